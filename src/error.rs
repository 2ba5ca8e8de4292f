//! Error types for attribute construction

use thiserror::Error;

/// Result type for attribute operations
pub type Result<T> = std::result::Result<T, AttributeError>;

/// Attribute construction errors.
///
/// The value-set algebra itself is total; only parsing an attribute
/// description string can fail.
#[derive(Error, Debug)]
pub enum AttributeError {
    #[error("invalid attribute description {input:?}: {reason}")]
    InvalidDescription { input: String, reason: String },
}
