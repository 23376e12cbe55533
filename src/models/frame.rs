// Composed frame handed to the renderer once per minute

use chrono::NaiveDateTime;
use serde::Serialize;
use std::net::IpAddr;

use super::{
    Cached, SYSTEM_USAGE_UNAVAILABLE, StockQuote, SystemUsageSnapshot, UNKNOWN_ICON,
    WEATHER_UNAVAILABLE, WeatherReading,
};

pub const NO_IP: &str = "No IP";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub header: String,
    pub clock: String,
    pub weather: String,
    pub weather_icon: String,
    pub stocks: Vec<String>,
    pub system_line: String,
    pub system: Option<SystemUsageSnapshot>,
}

impl Frame {
    pub fn compose<'a>(
        now: &NaiveDateTime,
        ip: Option<IpAddr>,
        system: &Cached<SystemUsageSnapshot>,
        weather: &Cached<WeatherReading>,
        stocks: impl IntoIterator<Item = (&'a str, &'a Cached<StockQuote>)>,
    ) -> Self {
        let ip = ip.map_or_else(|| NO_IP.to_string(), |ip| ip.to_string());
        Frame {
            header: format!("Paper Dash - IP Address: {}", ip),
            clock: now.format("%Y/%m/%d %H:%M").to_string(),
            weather: weather.display_or(WEATHER_UNAVAILABLE, WeatherReading::summary),
            weather_icon: weather
                .get()
                .map_or(UNKNOWN_ICON, |w| w.condition().icon)
                .to_string(),
            stocks: stocks
                .into_iter()
                .map(|(symbol, quote)| {
                    quote.display_or(StockQuote::unavailable_summary(symbol), StockQuote::summary)
                })
                .collect(),
            system_line: system.display_or(SYSTEM_USAGE_UNAVAILABLE, SystemUsageSnapshot::summary),
            system: system.get().copied(),
        }
    }
}
