//! # Fixed-Point Prices
//!
//! Wire prices are unsigned 32-bit integers with four implied decimals.
//! Encoding rounds to the nearest integer (half away from zero); truncation
//! is never used.

use super::errors::MappingError;

/// Implied-decimal scale of wire prices.
pub const PRICE_SCALE: f64 = 10_000.0;

pub fn decode_price(raw: u32) -> f64 {
    f64::from(raw) / PRICE_SCALE
}

pub fn encode_price(price: f64) -> Result<u32, MappingError> {
    let scaled = (price * PRICE_SCALE).round();
    if !scaled.is_finite() || scaled < 0.0 || scaled > f64::from(u32::MAX) {
        return Err(MappingError::PriceOutOfRange { price });
    }
    Ok(scaled as u32)
}
