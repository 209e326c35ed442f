//! # Domain Layer

pub mod audit;
pub mod chain;
pub mod errors;

pub use audit::*;
pub use chain::*;
pub use errors::*;
