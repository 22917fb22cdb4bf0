use std::path::Path;

use crate::error::Result;
use crate::types::Capacity;

#[cfg(feature = "fs2")]
pub mod space;
#[cfg(all(unix, feature = "statvfs"))]
pub mod statvfs;

/// Backend trait for volume capacity queries
///
/// This trait abstracts the underlying platform call, allowing us to:
/// - Use statvfs(3) on Unix
/// - Use the fs2 crate everywhere else (Windows disk free space API)
/// - Mock for testing
pub trait Backend: Send + Sync {
    /// Read total and available bytes of the volume backing `path`
    fn capacity(&self, path: &Path) -> Result<Capacity>;

    /// Short backend name, for diagnostics
    fn name(&self) -> &'static str;
}

/// Get the default backend for this platform.
///
/// statvfs on Unix, fs2 elsewhere.
#[cfg(all(unix, feature = "statvfs"))]
pub fn default_backend() -> Box<dyn Backend> {
    Box::new(statvfs::StatvfsBackend::new())
}

/// Get the default backend for this platform.
///
/// statvfs on Unix, fs2 elsewhere.
#[cfg(all(not(all(unix, feature = "statvfs")), feature = "fs2"))]
pub fn default_backend() -> Box<dyn Backend> {
    Box::new(space::SpaceBackend::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_is_object_safe() {
        fn _check(_: &dyn Backend) {}
    }

    #[cfg(all(unix, feature = "statvfs"))]
    #[test]
    fn unix_default_is_statvfs() {
        assert_eq!(default_backend().name(), "statvfs");
    }

    #[cfg(all(windows, feature = "fs2"))]
    #[test]
    fn windows_default_is_fs2() {
        assert_eq!(default_backend().name(), "fs2");
    }
}
