//! Error types for the bcapi library.

use thiserror::Error;

/// Reasons an entity fails validation.
///
/// Validation failures are returned as values and block persistence; they are
/// never raised by constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty or contains `&` / `%`.
    #[error("Invalid name for file: [{0}]")]
    InvalidName(String),

    /// Path is missing or is the root path.
    #[error("Invalid path for file: [{0}]")]
    InvalidPath(String),
}

/// Main error type for bcapi operations.
#[derive(Error, Debug)]
pub enum BcError {
    /// HTTP request failed with status code.
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// The storage API rejected the request.
    #[error("API error: {code} - {message}")]
    ApiError { code: u16, message: String },

    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The request did not complete within the configured timeout.
    #[error("HTTP request timed out")]
    Timeout,

    /// Invalid or unexpected response from server.
    #[error("Invalid response from server")]
    InvalidResponse,

    /// An entity was constructed directly at `/`.
    #[error("Cannot instantiate the \"/\" folder like this. Use Root::get() instead")]
    RootPath,

    /// Entity attributes failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The operation is not available on this entity.
    #[error("Operation not supported: {0}")]
    UnsupportedOperation(&'static str),

    /// A folder listing contained an entry with an unrecognized type tag.
    #[error("Unknown entity type: [{0}]")]
    UnknownEntityType(String),

    /// A `lastModified` value could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Missing or malformed site configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for bcapi operations.
pub type Result<T> = std::result::Result<T, BcError>;
