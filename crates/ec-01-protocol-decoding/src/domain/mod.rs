//! # Domain Layer
//!
//! Offset tables, the decoder and the re-encoder. No I/O.

pub mod decoder;
pub mod encoder;
pub mod errors;
pub mod layouts;
pub mod reader;
pub mod records;

pub use decoder::decode;
pub use encoder::encode;
pub use errors::*;
pub use records::*;
