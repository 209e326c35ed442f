//! # Domain Layer

pub mod errors;
pub mod signing;

pub use errors::*;
pub use signing::*;
