// External data feeds (weather, stock quotes). Providers live outside this crate.

use crate::models::{StockQuote, WeatherReading};
use std::future::Future;
use std::time::Duration;

pub trait WeatherFeed: Send + Sync {
    fn current(&self) -> impl Future<Output = anyhow::Result<WeatherReading>> + Send;
}

pub trait QuoteFeed: Send + Sync {
    fn quote(&self, symbol: &str) -> impl Future<Output = anyhow::Result<StockQuote>> + Send;
}

/// Await a feed call, failing with an error once `timeout` elapses.
pub async fn fetch_with_timeout<T>(
    timeout: Duration,
    fetch: impl Future<Output = anyhow::Result<T>>,
) -> anyhow::Result<T> {
    tokio::time::timeout(timeout, fetch)
        .await
        .map_err(|_| anyhow::anyhow!("feed timed out after {:?}", timeout))?
}

/// Feed with no provider behind it; every call fails, so the source stays unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledFeed;

impl WeatherFeed for DisabledFeed {
    async fn current(&self) -> anyhow::Result<WeatherReading> {
        anyhow::bail!("no weather provider configured")
    }
}

impl QuoteFeed for DisabledFeed {
    async fn quote(&self, symbol: &str) -> anyhow::Result<StockQuote> {
        anyhow::bail!("no quote provider configured for {}", symbol)
    }
}
