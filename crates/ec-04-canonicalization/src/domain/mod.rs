//! # Domain Layer

pub mod canonical;
pub mod errors;

pub use canonical::*;
pub use errors::*;
