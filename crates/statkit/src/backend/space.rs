//! Portable backend on top of the fs2 crate

use std::path::Path;

use super::Backend;
use crate::error::{Error, Result};
use crate::types::Capacity;

/// Backend that reads capacity through `fs2::statvfs`.
///
/// fs2 calls `statvfs` on Unix and `GetDiskFreeSpaceW` on Windows, so this
/// works wherever the dedicated statvfs backend is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceBackend;

impl SpaceBackend {
    /// Create a new fs2 backend
    pub fn new() -> Self {
        Self
    }
}

impl Backend for SpaceBackend {
    fn capacity(&self, path: &Path) -> Result<Capacity> {
        let stats = fs2::statvfs(path).map_err(|e| Error::query(path, e))?;
        Ok(Capacity {
            total: stats.total_space(),
            available: stats.available_space(),
        })
    }

    fn name(&self) -> &'static str {
        "fs2"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_volume() {
        let dir = tempfile::tempdir().unwrap();
        let capacity = SpaceBackend::new().capacity(dir.path()).unwrap();
        assert!(capacity.total > 0);
        assert!(capacity.available <= capacity.total);
    }

    #[test]
    fn test_missing_path_reports_os_message() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nonexistent").join("mount");

        let err = SpaceBackend::new().capacity(&missing).unwrap_err();
        assert!(err.is_storage_error());
        assert!(!err.message().is_empty());
    }

    #[cfg(all(unix, feature = "statvfs"))]
    #[test]
    fn test_agrees_with_statvfs_on_total() {
        let dir = tempfile::tempdir().unwrap();
        let space = SpaceBackend::new().capacity(dir.path()).unwrap();
        let statvfs = super::super::statvfs::StatvfsBackend::new()
            .capacity(dir.path())
            .unwrap();
        assert_eq!(space.total, statvfs.total);
    }
}
