// Aggregate CPU tick counters from /proc/stat and delta-based utilization.

use crate::error::SampleError;
use crate::models::clamp_percent;
use std::time::Instant;

/// Index of the `idle` field after the `cpu` label; `iowait` follows it.
const IDLE_FIELD: usize = 3;
const IOWAIT_FIELD: usize = 4;

/// Cumulative ticks read from the aggregate `cpu` line at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuSample {
    pub total_ticks: u64,
    pub idle_ticks: u64,
    pub taken_at: Instant,
}

impl CpuSample {
    /// Parse the aggregate `cpu ` line of a `/proc/stat` listing.
    pub fn parse(stat: &str, taken_at: Instant) -> Result<Self, SampleError> {
        let line = stat
            .lines()
            .find(|l| l.split_whitespace().next() == Some("cpu"))
            .ok_or_else(|| SampleError::parse("cpu counters", "no aggregate cpu line"))?;

        let values = line
            .split_whitespace()
            .skip(1)
            .map(|field| {
                field.parse::<u64>().map_err(|e| {
                    SampleError::parse("cpu counters", format!("field {:?}: {}", field, e))
                })
            })
            .collect::<Result<Vec<u64>, _>>()?;

        if values.len() <= IDLE_FIELD {
            return Err(SampleError::parse(
                "cpu counters",
                format!("expected at least {} fields, got {}", IDLE_FIELD + 1, values.len()),
            ));
        }

        // Kernels before 2.5.41 have no iowait column.
        let iowait = values.get(IOWAIT_FIELD).copied().unwrap_or(0);
        let idle_ticks = values[IDLE_FIELD].saturating_add(iowait);
        let total_ticks = values.iter().fold(0u64, |acc, v| acc.saturating_add(*v));

        Ok(Self {
            total_ticks,
            idle_ticks,
            taken_at,
        })
    }
}

/// Utilization between two samples: `100 * (1 - delta_idle / delta_total)`, clamped.
///
/// Returns 0.0 when the total did not advance (or went backwards).
pub fn utilization(before: &CpuSample, after: &CpuSample) -> f64 {
    let delta_total = after.total_ticks as f64 - before.total_ticks as f64;
    if delta_total <= 0.0 {
        return 0.0;
    }
    let delta_idle = after.idle_ticks as f64 - before.idle_ticks as f64;
    clamp_percent(100.0 * (1.0 - delta_idle / delta_total))
}
