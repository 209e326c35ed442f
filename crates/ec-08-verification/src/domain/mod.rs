//! # Domain Layer
//!
//! The evidence pack under test (`pack`), the report it produces (`report`)
//! and field-level draft comparison used by replay (`diff`).

pub mod diff;
pub mod errors;
pub mod pack;
pub mod report;

pub use diff::*;
pub use errors::*;
pub use pack::*;
pub use report::*;
