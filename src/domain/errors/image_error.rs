//! Caller-visible failures.

use thiserror::Error;

use super::CacheError;

/// Failure surfaced by a caller-facing operation.
///
/// Each variant maps to a fixed string code through [`ImageError::code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ImageError {
    #[error("Failed to cache image: {cause}")]
    Load {
        #[source]
        cause: CacheError,
    },

    #[error("Error clearing memory cache: {cause}")]
    ClearMemory {
        #[source]
        cause: CacheError,
    },

    #[error("Error clearing disk cache: {cause}")]
    ClearDisk {
        #[source]
        cause: CacheError,
    },
}

impl ImageError {
    /// Code reported for load failures.
    pub const LOAD_CODE: &'static str = "ERROR";
    /// Code reported for memory-clear failures.
    pub const CLEAR_MEMORY_CODE: &'static str = "ERROR_CLEARING_MEMORY_CACHE";
    /// Code reported for disk-clear failures.
    pub const CLEAR_DISK_CODE: &'static str = "ERROR_CLEARING_DISK_CACHE";

    /// Creates load error.
    #[must_use]
    pub const fn load(cause: CacheError) -> Self {
        Self::Load { cause }
    }

    /// Fixed string code for this failure.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Load { .. } => Self::LOAD_CODE,
            Self::ClearMemory { .. } => Self::CLEAR_MEMORY_CODE,
            Self::ClearDisk { .. } => Self::CLEAR_DISK_CODE,
        }
    }

    /// Underlying engine failure.
    #[must_use]
    pub const fn cause(&self) -> &CacheError {
        match self {
            Self::Load { cause } | Self::ClearMemory { cause } | Self::ClearDisk { cause } => cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_messages() {
        let err = ImageError::load(CacheError::network("HTTP 404"));
        assert_eq!(err.code(), "ERROR");
        assert_eq!(err.to_string(), "Failed to cache image: Network error: HTTP 404");

        let err = ImageError::ClearDisk {
            cause: CacheError::io("denied"),
        };
        assert_eq!(err.code(), "ERROR_CLEARING_DISK_CACHE");
        assert_eq!(err.cause(), &CacheError::io("denied"));
    }
}
