//! Custom error types for balance-digest
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for balance-digest operations
#[derive(Error, Debug)]
pub enum DigestError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// The budget data provider could not be reached or opened
    #[error("Could not connect to budget provider: {0}")]
    ProviderConnection(String),

    /// The provider answered, but with data we cannot read
    #[error("Provider error: {0}")]
    Provider(String),

    /// The persisted snapshot exists but cannot be interpreted
    #[error("Malformed snapshot {path}: {reason}")]
    MalformedSnapshot { path: String, reason: String },

    /// A composite calculation key did not match the fixed-width layout
    #[error("Invalid calculation key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Two balance records for the same subcategory in one period
    #[error("Duplicate balance for subcategory {subcategory} in {period}")]
    DuplicateBalance { subcategory: String, period: String },

    /// The delivery channel itself failed (not a single recipient)
    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl DigestError {
    /// Check if this is a provider connection failure
    pub fn is_provider_connection(&self) -> bool {
        matches!(self, Self::ProviderConnection(_))
    }

    /// Check if this is a malformed snapshot error
    pub fn is_malformed_snapshot(&self) -> bool {
        matches!(self, Self::MalformedSnapshot { .. })
    }
}

impl From<std::io::Error> for DigestError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DigestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for balance-digest operations
pub type DigestResult<T> = Result<T, DigestError>;
