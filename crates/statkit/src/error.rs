use std::path::PathBuf;
use thiserror::Error;

/// Wire code for a failed volume query.
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";

/// Wire code for an unrecognized method name.
pub const NOT_IMPLEMENTED: &str = "NOT_IMPLEMENTED";

/// Errors that can occur while querying storage statistics.
///
/// Every platform failure (missing path, permission denied, unsupported
/// filesystem, ...) collapses into [`Error::StorageQuery`]. The only other
/// outcome is a caller asking for a method the channel does not know.
#[derive(Debug, Error)]
pub enum Error {
    /// The path could not be resolved to a readable volume
    #[error("failed to query storage for {path}: {message}")]
    StorageQuery {
        /// Path the caller asked about (after expansion)
        path: PathBuf,
        /// Underlying platform message, suitable for display
        message: String,
    },

    /// The caller invoked a method name that is not recognized
    #[error("method not implemented: {0}")]
    UnsupportedOperation(String),
}

impl Error {
    /// Build a query error from a path and any displayable cause.
    pub fn query(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::StorageQuery {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Wire code reported to the caller layer.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StorageQuery { .. } => STORAGE_ERROR,
            Self::UnsupportedOperation(_) => NOT_IMPLEMENTED,
        }
    }

    /// Human-readable message without the path prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::StorageQuery { message, .. } => message,
            Self::UnsupportedOperation(method) => method,
        }
    }

    /// Returns true if this is a volume query failure
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Self::StorageQuery { .. })
    }

    /// Returns true if the caller asked for an unknown method
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation(_))
    }
}

/// Result type for storage queries
pub type Result<T> = std::result::Result<T, Error>;
