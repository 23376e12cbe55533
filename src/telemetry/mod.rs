// Host telemetry read straight from procfs counters

pub mod cpu;
pub mod disk;
pub mod memory;
pub mod mounts;

use crate::error::SampleError;
use crate::models::SystemUsageSnapshot;
use cpu::CpuSample;
use disk::{CapacityQuery, StatvfsQuery};
use memory::MemorySnapshot;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::instrument;

pub struct TelemetryRepo<Q = StatvfsQuery> {
    proc_root: PathBuf,
    cpu_window: Duration,
    capacity: Arc<Q>,
    is_dir: fn(&Path) -> bool,
}

impl TelemetryRepo<StatvfsQuery> {
    pub fn new(proc_root: impl Into<PathBuf>, cpu_window: Duration) -> Self {
        Self::with_capacity_query(proc_root, cpu_window, StatvfsQuery)
    }
}

impl<Q: CapacityQuery + 'static> TelemetryRepo<Q> {
    pub fn with_capacity_query(
        proc_root: impl Into<PathBuf>,
        cpu_window: Duration,
        capacity: Q,
    ) -> Self {
        Self {
            proc_root: proc_root.into(),
            cpu_window,
            capacity: Arc::new(capacity),
            is_dir: Path::is_dir,
        }
    }

    /// Replace the check deciding whether a mount path is a live directory.
    pub fn with_dir_check(mut self, is_dir: fn(&Path) -> bool) -> Self {
        self.is_dir = is_dir;
        self
    }

    async fn read_counter(&self, name: &str) -> Result<String, SampleError> {
        let path = self.proc_root.join(name);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SampleError::Read { path, source })
    }

    async fn read_cpu_sample(&self) -> Result<CpuSample, SampleError> {
        let stat = self.read_counter("stat").await?;
        CpuSample::parse(&stat, Instant::now())
    }

    /// Reads the aggregate counters twice, `cpu_window` apart.
    #[instrument(skip(self), fields(repo = "telemetry", operation = "sample_cpu"))]
    pub async fn sample_cpu(&self) -> Result<f64, SampleError> {
        let before = self.read_cpu_sample().await?;
        tokio::time::sleep(self.cpu_window).await;
        let after = self.read_cpu_sample().await?;
        Ok(cpu::utilization(&before, &after))
    }

    #[instrument(skip(self), fields(repo = "telemetry", operation = "sample_memory"))]
    pub async fn sample_memory(&self) -> Result<f64, SampleError> {
        let meminfo = self.read_counter("meminfo").await?;
        Ok(MemorySnapshot::parse(&meminfo)?.used_percent())
    }

    /// Blended usage over real mounts. Directory checks and `statvfs` run on the blocking pool.
    #[instrument(skip(self), fields(repo = "telemetry", operation = "sample_drive"))]
    pub async fn sample_drive(&self) -> Result<f64, SampleError> {
        let table = self.read_counter("mounts").await?;
        let capacity = self.capacity.clone();
        let is_dir = self.is_dir;
        let totals = tokio::task::spawn_blocking(move || {
            let mounts = mounts::retain_real_mounts(mounts::parse_mount_table(&table), is_dir);
            disk::aggregate(&mounts, capacity.as_ref())
        })
        .await?;
        tracing::debug!(
            mounts = totals.contributing_mounts,
            total_bytes = totals.total_bytes,
            used_bytes = totals.used_bytes,
            "drive totals"
        );
        Ok(totals.percent())
    }

    /// CPU, memory and drive together. Any failure fails the whole sample.
    pub async fn sample_system_usage(&self) -> Result<SystemUsageSnapshot, SampleError> {
        let cpu = self.sample_cpu().await?;
        let memory = self.sample_memory().await?;
        let drive = self.sample_drive().await?;
        Ok(SystemUsageSnapshot::new(cpu, memory, drive))
    }
}
