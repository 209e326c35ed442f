//! # Domain Layer
//!
//! Tree construction and proofs (`tree`), closed batches (`batch`) and the
//! count/age batching policy (`batcher`).

pub mod batch;
pub mod batcher;
pub mod errors;
pub mod tree;

pub use batch::*;
pub use batcher::*;
pub use errors::*;
pub use tree::*;
