use serde::Deserialize;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scheduler: SchedulerConfig,
    pub sampling: SamplingConfig,
    pub feeds: FeedsConfig,
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// How often the loop wakes up; must stay below a minute so no minute is skipped.
    pub poll_interval_secs: u64,
    pub system_stats_interval_minutes: u32,
    pub weather_interval_minutes: u32,
    pub stock_interval_minutes: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 10,
            system_stats_interval_minutes: 1,
            weather_interval_minutes: 5,
            stock_interval_minutes: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Root of the procfs tree holding `stat`, `meminfo` and `mounts`.
    pub proc_root: String,
    pub cpu_window_ms: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            proc_root: "/proc".into(),
            cpu_window_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    pub timeout_secs: u64,
    /// Stock symbols, displayed in this order.
    pub stocks: Vec<String>,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            stocks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Address used to pick the outbound interface for the header IP. Nothing is sent to it.
    pub probe_addr: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            probe_addr: "8.8.8.8:80".into(),
        }
    }
}

impl AppConfig {
    /// Load from `CONFIG_FILE` (default `config.toml`). A missing file means defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path, "config file not found, using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(anyhow::anyhow!("read config {}: {}", path, e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let s = &self.scheduler;
        anyhow::ensure!(
            (1..60).contains(&s.poll_interval_secs),
            "scheduler.poll_interval_secs must be between 1 and 59, got {}",
            s.poll_interval_secs
        );
        for (name, value) in [
            ("system_stats_interval_minutes", s.system_stats_interval_minutes),
            ("weather_interval_minutes", s.weather_interval_minutes),
            ("stock_interval_minutes", s.stock_interval_minutes),
        ] {
            anyhow::ensure!(
                (1..=60).contains(&value),
                "scheduler.{} must be between 1 and 60, got {}",
                name,
                value
            );
        }
        anyhow::ensure!(
            !self.sampling.proc_root.is_empty(),
            "sampling.proc_root must be non-empty"
        );
        anyhow::ensure!(
            (1..=5000).contains(&self.sampling.cpu_window_ms),
            "sampling.cpu_window_ms must be between 1 and 5000, got {}",
            self.sampling.cpu_window_ms
        );
        anyhow::ensure!(
            (1..60).contains(&self.feeds.timeout_secs),
            "feeds.timeout_secs must be between 1 and 59, got {}",
            self.feeds.timeout_secs
        );
        // A slow poll plus its wait for the next wake-up must still land inside every minute.
        let worst_gap_ms = (s.poll_interval_secs + self.feeds.timeout_secs) * 1000
            + self.sampling.cpu_window_ms;
        anyhow::ensure!(
            worst_gap_ms < 60_000,
            "scheduler.poll_interval_secs + feeds.timeout_secs + sampling.cpu_window_ms \
             must stay under a minute, got {} ms",
            worst_gap_ms
        );
        let mut seen = HashSet::new();
        for symbol in &self.feeds.stocks {
            anyhow::ensure!(
                !symbol.trim().is_empty(),
                "feeds.stocks must not contain empty symbols"
            );
            anyhow::ensure!(
                seen.insert(symbol.as_str()),
                "feeds.stocks contains duplicate symbol {}",
                symbol
            );
        }
        anyhow::ensure!(
            self.network.probe_addr.parse::<SocketAddr>().is_ok(),
            "network.probe_addr must be a socket address, got {:?}",
            self.network.probe_addr
        );
        Ok(())
    }
}

// Accessors assume `validate` passed.

impl SchedulerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn system_stats_interval(&self) -> NonZeroU32 {
        NonZeroU32::new(self.system_stats_interval_minutes).unwrap_or(NonZeroU32::MIN)
    }

    pub fn weather_interval(&self) -> NonZeroU32 {
        NonZeroU32::new(self.weather_interval_minutes).unwrap_or(NonZeroU32::MIN)
    }

    pub fn stock_interval(&self) -> NonZeroU32 {
        NonZeroU32::new(self.stock_interval_minutes).unwrap_or(NonZeroU32::MIN)
    }
}

impl SamplingConfig {
    pub fn cpu_window(&self) -> Duration {
        Duration::from_millis(self.cpu_window_ms)
    }
}

impl FeedsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl NetworkConfig {
    pub fn probe_addr(&self) -> Option<SocketAddr> {
        self.probe_addr.parse().ok()
    }
}
