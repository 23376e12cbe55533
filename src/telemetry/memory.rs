// /proc/meminfo parsing and used-memory percentage

use crate::error::SampleError;
use crate::models::ratio_percent;
use std::collections::BTreeMap;

/// Point-in-time memory counters, label -> kB.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySnapshot {
    counters: BTreeMap<String, u64>,
}

impl MemorySnapshot {
    /// Parse `Key:   value kB` lines. Blank lines are skipped; anything else malformed is an error.
    pub fn parse(meminfo: &str) -> Result<Self, SampleError> {
        let mut counters = BTreeMap::new();
        for line in meminfo.lines().filter(|l| !l.trim().is_empty()) {
            let (key, rest) = line
                .split_once(':')
                .ok_or_else(|| SampleError::parse("memory counters", format!("no ':' in {:?}", line)))?;
            let value = rest
                .split_whitespace()
                .next()
                .ok_or_else(|| SampleError::parse("memory counters", format!("no value for {}", key)))?
                .parse::<u64>()
                .map_err(|e| SampleError::parse("memory counters", format!("{}: {}", key, e)))?;
            counters.insert(key.trim().to_string(), value);
        }
        Ok(Self { counters })
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.counters.get(label).copied()
    }

    pub fn total_kb(&self) -> u64 {
        self.get("MemTotal").unwrap_or(0)
    }

    /// `MemAvailable`, or `MemFree + Buffers + Cached` on kernels that do not report it.
    pub fn available_kb(&self) -> u64 {
        self.get("MemAvailable").unwrap_or_else(|| {
            ["MemFree", "Buffers", "Cached"]
                .iter()
                .map(|k| self.get(k).unwrap_or(0))
                .fold(0u64, u64::saturating_add)
        })
    }

    pub fn used_percent(&self) -> f64 {
        let total = self.total_kb();
        let used = total.saturating_sub(self.available_kb());
        ratio_percent(used as f64, total as f64)
    }
}
