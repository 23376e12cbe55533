// Per-mount capacity queries blended into one drive percentage

use super::mounts::MountPoint;
use crate::error::SampleError;
use crate::models::ratio_percent;
use std::path::Path;

/// Raw capacity of one filesystem, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub total_bytes: u64,
    /// Space available to unprivileged users.
    pub free_bytes: u64,
}

pub trait CapacityQuery: Send + Sync {
    fn capacity(&self, path: &Path) -> Result<Capacity, SampleError>;
}

/// `statvfs(3)` backed capacity query.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatvfsQuery;

impl CapacityQuery for StatvfsQuery {
    fn capacity(&self, path: &Path) -> Result<Capacity, SampleError> {
        let stat = nix::sys::statvfs::statvfs(path).map_err(|errno| SampleError::Query {
            path: path.to_path_buf(),
            source: errno.into(),
        })?;
        let fragment = stat.fragment_size() as u64;
        Ok(Capacity {
            total_bytes: (stat.blocks() as u64).saturating_mul(fragment),
            free_bytes: (stat.blocks_available() as u64).saturating_mul(fragment),
        })
    }
}

/// Used/total bytes summed over every mount that answered its capacity query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskTotals {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub contributing_mounts: usize,
}

impl DiskTotals {
    pub fn add(&mut self, capacity: Capacity) {
        self.total_bytes = self.total_bytes.saturating_add(capacity.total_bytes);
        self.used_bytes = self
            .used_bytes
            .saturating_add(capacity.total_bytes.saturating_sub(capacity.free_bytes));
        self.contributing_mounts += 1;
    }

    /// Blended usage, or `Empty` when no mount contributed a positive total.
    pub fn try_percent(&self) -> Result<f64, SampleError> {
        if self.total_bytes == 0 {
            return Err(SampleError::Empty);
        }
        Ok(ratio_percent(self.used_bytes as f64, self.total_bytes as f64))
    }

    pub fn percent(&self) -> f64 {
        self.try_percent().unwrap_or(0.0)
    }
}

/// Query each mount; a failed query drops that mount only.
pub fn aggregate(mounts: &[MountPoint], query: &impl CapacityQuery) -> DiskTotals {
    let mut totals = DiskTotals::default();
    for mount in mounts {
        match query.capacity(&mount.path) {
            Ok(capacity) => totals.add(capacity),
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    mount = %mount.path.display(),
                    operation = "capacity_query",
                    "skipping mount"
                );
            }
        }
    }
    totals
}
