// Domain models

mod cached;
mod feed;
mod frame;
mod usage;

pub use cached::Cached;
pub use feed::{StockQuote, UNKNOWN_ICON, WEATHER_UNAVAILABLE, WeatherCondition, WeatherReading};
pub use frame::{Frame, NO_IP};
pub use usage::{SYSTEM_USAGE_UNAVAILABLE, SystemUsageSnapshot, clamp_percent, ratio_percent};
