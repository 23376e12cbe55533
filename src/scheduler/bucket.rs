// Calendar-minute key: YYYYMMDDHHMM packed into an integer

use chrono::{Datelike, NaiveDateTime, Timelike};
use std::fmt;

/// Orders and compares like the wall-clock minute it encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteBucket(u64);

impl MinuteBucket {
    pub fn from_datetime(at: &NaiveDateTime) -> Self {
        let year = u64::try_from(at.year()).unwrap_or(0);
        let encoded = year * 100_000_000
            + u64::from(at.month()) * 1_000_000
            + u64::from(at.day()) * 10_000
            + u64::from(at.hour()) * 100
            + u64::from(at.minute());
        Self(encoded)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    pub fn minute_of_hour(self) -> u32 {
        (self.0 % 100) as u32
    }
}

impl fmt::Display for MinuteBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:012}", self.0)
    }
}
