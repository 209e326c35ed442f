//! # Canonicalization Errors

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CanonicalizationError {
    /// NaN or infinity; JSON has no canonical form for either.
    #[error("Non-canonicalizable value in {field}")]
    NonCanonicalizableValue { field: String },

    /// The value could not be turned into a JSON tree at all.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CanonicalizationError {
    fn from(err: serde_json::Error) -> Self {
        CanonicalizationError::Serialization(err.to_string())
    }
}
