//! Errors raised by the image engine.

use thiserror::Error;

/// Result type for engine operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors that can occur inside the fetch/decode/cache engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// Target could not be found.
    #[error("Image not found: {0}")]
    NotFound(String),
    /// Failed to decode image.
    #[error("Decode error: {0}")]
    DecodeError(String),
    /// I/O error during cache operation.
    #[error("IO error: {0}")]
    IoError(String),
    /// Network error during download.
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The work never reported completion.
    #[error("Interrupted: {0}")]
    Interrupted(String),
}

impl CacheError {
    /// Creates not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeError(message.into())
    }

    /// Creates I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::IoError(message.into())
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError(message.into())
    }

    /// Creates interrupted error.
    #[must_use]
    pub fn interrupted(message: impl Into<String>) -> Self {
        Self::Interrupted(message.into())
    }
}
