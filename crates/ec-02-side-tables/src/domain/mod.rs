//! # Domain Layer
//!
//! Pure in-memory tables. No I/O, no locking: each table is owned by exactly
//! one partition worker at a time.

pub mod errors;
pub mod locate;
pub mod orders;
pub mod routing;
pub mod tables;

pub use errors::*;
pub use locate::*;
pub use orders::*;
pub use routing::*;
pub use tables::*;
