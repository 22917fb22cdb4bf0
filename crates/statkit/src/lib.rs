//! # statkit
//!
//! A Rust library for querying the capacity of the volume backing a path.
//!
//! A query returns three byte counts: `total`, `free` and `used`, where
//! `used` is always derived as `total - free`. Queries are read-only and
//! never cached, since capacity can change between calls.
//!
//! ## Example
//!
//! ```no_run
//! use statkit::Provider;
//!
//! let provider = Provider::new();
//! let stats = provider.stats("/").expect("Failed to query storage");
//!
//! assert_eq!(stats.used() + stats.free(), stats.total());
//! ```
//!
//! ## Method channel
//!
//! [`channel::Channel`] answers `getStorageInfo` calls from an embedding
//! layer with either the `{total, free, used}` mapping, a `STORAGE_ERROR`
//! code plus message, or an explicit not-implemented signal for unknown
//! method names.
//!
//! ## Backends
//!
//! - `statvfs` (default): POSIX `statvfs(3)` through `libc`, used on Unix.
//! - `fs2` (default): the fs2 crate, used on Windows and any platform
//!   without the statvfs backend.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Backend implementations for capacity queries.
pub mod backend;
/// Method-call dispatch for embedding layers.
pub mod channel;
/// Error types for storage queries.
pub mod error;
/// Capacity and statistics types.
pub mod types;

pub use error::{Error, Result};
pub use types::{Capacity, StorageStats};

use backend::Backend;
use std::path::{Path, PathBuf};

/// Stateless provider of storage statistics.
///
/// Each call to [`stats`](Self::stats) re-queries the backend. The provider
/// holds no mutable state, so it can be shared freely across threads.
pub struct Provider {
    backend: Box<dyn Backend>,
}

impl Provider {
    /// Create a new Provider with the default backend for this platform.
    #[cfg(any(all(unix, feature = "statvfs"), feature = "fs2"))]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            backend: backend::default_backend(),
        }
    }

    /// Create a provider with a custom backend (useful for testing).
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Name of the backend answering queries.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Query total, free and used bytes of the volume backing `path`.
    ///
    /// # Errors
    ///
    /// - `StorageQuery`: the path is empty, or the volume could not be
    ///   resolved or read. The error carries the platform message.
    pub fn stats(&self, path: impl AsRef<Path>) -> Result<StorageStats> {
        let path = expand_and_validate_path(path.as_ref())?;
        let capacity = self.backend.capacity(&path)?;
        Ok(StorageStats::from_capacity(capacity))
    }
}

/// Expand a leading `~/` to `$HOME`. Other shell syntax is left as-is;
/// callers wanting full expansion use [`channel::Channel::with_path_expander`]
/// or expand before calling [`Provider::stats`].
fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}

/// Expand path and make it absolute.
fn expand_and_validate_path(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(Error::query(path, "empty path"));
    }

    let expanded = expand_path(path);

    if expanded.is_absolute() {
        return Ok(expanded);
    }

    let cwd = std::env::current_dir().map_err(|e| Error::query(&expanded, e))?;
    Ok(cwd.join(expanded))
}
