//! # Domain Layer
//!
//! Enumeration tables, value conversions and the mapper itself.

pub mod context;
pub mod enums;
pub mod errors;
pub mod mapper;
pub mod price;
pub mod timestamp;

pub use context::*;
pub use errors::*;
pub use mapper::*;
pub use price::*;
pub use timestamp::*;
