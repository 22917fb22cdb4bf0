use serde::{Deserialize, Serialize};

/// Raw capacity reading reported by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capacity {
    /// Total bytes provisioned on the volume
    pub total: u64,
    /// Bytes available to unprivileged callers
    pub available: u64,
}

/// Capacity statistics of a single volume, in bytes.
///
/// `used` is always derived as `total - free`, so `used + free == total`
/// holds for every value of this type. Fields are private to keep it that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStats")]
pub struct StorageStats {
    total: u64,
    free: u64,
    used: u64,
}

impl StorageStats {
    /// Derive statistics from a capacity reading.
    ///
    /// A reading with more available than total bytes is clamped so that
    /// `free == total` and `used == 0`.
    pub fn from_capacity(capacity: Capacity) -> Self {
        let free = capacity.available.min(capacity.total);
        Self {
            total: capacity.total,
            free,
            used: capacity.total - free,
        }
    }

    /// Total bytes provisioned
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Bytes currently free
    pub fn free(&self) -> u64 {
        self.free
    }

    /// Bytes in use
    pub fn used(&self) -> u64 {
        self.used
    }

    /// Used space as a whole-number percentage (0-100), truncated.
    pub fn used_percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.used as f64 / self.total as f64 * 100.0) as u32
        }
    }
}

impl From<Capacity> for StorageStats {
    fn from(capacity: Capacity) -> Self {
        Self::from_capacity(capacity)
    }
}

/// Wire shape accepted when deserializing [`StorageStats`].
#[derive(Deserialize)]
struct RawStats {
    total: u64,
    free: u64,
    used: u64,
}

impl TryFrom<RawStats> for StorageStats {
    type Error = String;

    fn try_from(raw: RawStats) -> std::result::Result<Self, Self::Error> {
        if raw.free.checked_add(raw.used) != Some(raw.total) {
            return Err(format!(
                "inconsistent storage stats: used ({}) + free ({}) != total ({})",
                raw.used, raw.free, raw.total
            ));
        }
        Ok(Self {
            total: raw.total,
            free: raw.free,
            used: raw.used,
        })
    }
}
