//! Error types for the helper library
//!
//! A single error enum covers every fallible helper. Record-level errors carry
//! the 0-based input position of the offending record so callers can point at
//! the bad element of their collection.

use thiserror::Error;

/// Main error type for the helper library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HelperError {
    // Record input errors

    /// A record lacks one of the configured id / parent / sort fields
    #[error("Record {index} is missing field '{field}'")]
    MissingField { field: String, index: usize },

    /// An input element is not a JSON object
    #[error("Element {index} is not a record")]
    NotARecord { index: usize },

    /// The id value cannot be used as a lookup key
    #[error("Record {index} has an invalid id in field '{field}'")]
    InvalidId { field: String, index: usize },

    // Positional access errors

    /// Position outside the wrapped collection
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    // Configuration errors

    /// Options or builder validation error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // External errors

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Custom error with message
    #[error("{0}")]
    Custom(String),
}

/// Type alias for Results using HelperError
pub type Result<T> = std::result::Result<T, HelperError>;

impl HelperError {
    /// Create a custom error with a message
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        Self::Custom(msg.into())
    }

    pub(crate) fn missing_field(field: &str, index: usize) -> Self {
        Self::MissingField {
            field: field.to_string(),
            index,
        }
    }

    /// Check if this error was caused by malformed input records
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::NotARecord { .. } | Self::InvalidId { .. }
        )
    }

    /// Check if this error is a configuration error
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self, Self::ConfigurationError(_))
    }
}

impl From<serde_json::Error> for HelperError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<std::io::Error> for HelperError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}
