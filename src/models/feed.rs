// Pre-parsed external feed values (weather, stock quotes)

use serde::{Deserialize, Serialize};

pub const WEATHER_UNAVAILABLE: &str = "--°C | RH --%";
pub const UNKNOWN_ICON: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub relative_humidity: u8,
    /// WMO weather interpretation code.
    pub code: u16,
}

/// Display label and icon category for a WMO code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCondition {
    pub label: &'static str,
    pub icon: &'static str,
}

impl WeatherReading {
    pub fn summary(&self) -> String {
        format!(
            "{:.1}°C | RH {}%",
            self.temperature_c, self.relative_humidity
        )
    }

    pub fn condition(&self) -> WeatherCondition {
        Self::condition_for(self.code)
    }

    pub fn condition_for(code: u16) -> WeatherCondition {
        let (label, icon) = match code {
            0 => ("Clear", "clear"),
            1 => ("Mostly clr", "mostly_clear"),
            2 => ("Partly cldy", "partly_cloudy"),
            3 => ("Cloudy", "cloudy"),
            45 => ("Fog", "fog"),
            48 => ("Rime fog", "rime_fog"),
            51 | 53 => ("Drizzle", "drizzle"),
            61 => ("Light rain", "light_rain"),
            63 => ("Rain", "rain"),
            65 => ("Heavy rain", "heavy_rain"),
            71 => ("Snow", "snow"),
            80 => ("Rain showers", "rain_showers"),
            _ => ("Unknown", UNKNOWN_ICON),
        };
        WeatherCondition { label, icon }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    pub price: f64,
    pub previous_close: f64,
}

impl StockQuote {
    pub fn change(&self) -> f64 {
        self.price - self.previous_close
    }

    /// Percent change against the previous close; 0.0 when there is no usable close.
    pub fn change_percent(&self) -> f64 {
        if self.previous_close <= 0.0 {
            return 0.0;
        }
        self.change() / self.previous_close * 100.0
    }

    pub fn arrow(&self) -> &'static str {
        let change = self.change();
        if change > 0.0 {
            "↑"
        } else if change < 0.0 {
            "↓"
        } else {
            "-"
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{:<4}: {:>6.2} {} {:+6.2}%",
            self.symbol,
            self.price,
            self.arrow(),
            self.change_percent()
        )
    }

    pub fn unavailable_summary(symbol: &str) -> String {
        format!("{:<4}:   N/A", symbol)
    }
}
