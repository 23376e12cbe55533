// Per-source refresh bookkeeping keyed to calendar minutes

use super::MinuteBucket;
use crate::models::Cached;
use std::fmt;
use std::num::NonZeroU32;

/// A telemetry source with its own refresh cadence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    SystemStats,
    Weather,
    Stock(String),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::SystemStats => f.write_str("system-stats"),
            Source::Weather => f.write_str("weather"),
            Source::Stock(symbol) => write!(f, "stock:{}", symbol),
        }
    }
}

/// Last refreshed minute and last good value of one source.
///
/// A source is due when the minute of the hour is a multiple of the interval and
/// it has not yet been refreshed in that minute. Only [`RefreshState::record_success`]
/// mutates the state; a failed refresh leaves it untouched so the next poll in the
/// same minute retries.
#[derive(Debug, Clone)]
pub struct RefreshState<T> {
    interval_minutes: NonZeroU32,
    last_refreshed: Option<MinuteBucket>,
    last_good: Cached<T>,
}

impl<T> RefreshState<T> {
    pub fn new(interval_minutes: NonZeroU32) -> Self {
        Self {
            interval_minutes,
            last_refreshed: None,
            last_good: Cached::Unavailable,
        }
    }

    pub fn last_refreshed(&self) -> Option<MinuteBucket> {
        self.last_refreshed
    }

    pub fn last_good(&self) -> &Cached<T> {
        &self.last_good
    }

    pub fn is_due(&self, bucket: MinuteBucket) -> bool {
        bucket.minute_of_hour() % self.interval_minutes.get() == 0
            && self.last_refreshed != Some(bucket)
    }

    pub fn record_success(&mut self, bucket: MinuteBucket, value: T) {
        self.last_refreshed = Some(bucket);
        self.last_good = Cached::Value(value);
    }
}
