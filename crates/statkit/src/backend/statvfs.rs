//! statvfs(3) backend

use std::path::Path;

use super::Backend;
use crate::error::{Error, Result};
use crate::types::Capacity;

/// Backend that reads capacity through the POSIX `statvfs` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatvfsBackend;

impl StatvfsBackend {
    /// Create a new statvfs backend
    pub fn new() -> Self {
        Self
    }
}

impl Backend for StatvfsBackend {
    fn capacity(&self, path: &Path) -> Result<Capacity> {
        statvfs(path)
    }

    fn name(&self) -> &'static str {
        "statvfs"
    }
}

#[allow(unsafe_code)]
fn statvfs(path: &Path) -> Result<Capacity> {
    use std::ffi::CString;
    use std::mem::MaybeUninit;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| Error::query(path, "path contains an interior NUL byte"))?;

    let mut stat: MaybeUninit<libc::statvfs> = MaybeUninit::uninit();

    // SAFETY: statvfs is a standard POSIX call. `c_path` is a valid
    // NUL-terminated string and `stat` is only read after a zero return.
    let result = unsafe { libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) };
    if result != 0 {
        return Err(Error::query(path, std::io::Error::last_os_error()));
    }

    // SAFETY: statvfs returned 0, so the struct is fully initialized.
    let stat = unsafe { stat.assume_init() };

    let frsize = u64::from(stat.f_frsize);
    Ok(Capacity {
        total: u64::from(stat.f_blocks).saturating_mul(frsize),
        available: u64::from(stat.f_bavail).saturating_mul(frsize),
    })
}
