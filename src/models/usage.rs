// Host utilization models and percentage arithmetic

use serde::{Deserialize, Serialize};

/// Clamp a percentage into [0, 100]. NaN becomes 0.0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// `100 * part / whole`, clamped. A non-positive `whole` yields 0.0 without dividing.
pub fn ratio_percent(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 || whole.is_nan() {
        return 0.0;
    }
    clamp_percent(100.0 * part / whole)
}

/// Composed host utilization handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemUsageSnapshot {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub drive_percent: f64,
}

impl SystemUsageSnapshot {
    pub fn new(cpu_percent: f64, memory_percent: f64, drive_percent: f64) -> Self {
        Self {
            cpu_percent: clamp_percent(cpu_percent),
            memory_percent: clamp_percent(memory_percent),
            drive_percent: clamp_percent(drive_percent),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "CPU {:.0}% | MEM {:.0}% | DSK {:.0}%",
            self.cpu_percent, self.memory_percent, self.drive_percent
        )
    }
}

/// Placeholder line when no system sample has succeeded yet.
pub const SYSTEM_USAGE_UNAVAILABLE: &str = "CPU --% | MEM --% | DSK --%";
