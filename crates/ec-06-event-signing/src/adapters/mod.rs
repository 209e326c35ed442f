//! # Adapters

pub mod local;

pub use local::LocalKeyProvider;
