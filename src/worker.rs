// Dashboard control loop: poll, refresh due sources, redraw at most once per minute.
// Owns every RefreshState and the render gate; nothing else mutates them.

use crate::config::AppConfig;
use crate::feeds::{QuoteFeed, WeatherFeed, fetch_with_timeout};
use crate::models::{Frame, StockQuote, SystemUsageSnapshot, WeatherReading};
use crate::network;
use crate::renderer::Renderer;
use crate::scheduler::{MinuteBucket, RefreshState, RenderGate, Source};
use crate::telemetry::TelemetryRepo;
use crate::telemetry::disk::CapacityQuery;
use chrono::NaiveDateTime;
use futures_util::future::join_all;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use tokio::time::{Duration, interval};

/// Samplers, feeds and the display the loop drives.
pub struct DashboardDeps<Q, W, S, R> {
    pub telemetry: TelemetryRepo<Q>,
    pub weather_feed: W,
    pub quote_feed: S,
    pub renderer: R,
}

/// Cadences and feed settings.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub system_stats_interval: NonZeroU32,
    pub weather_interval: NonZeroU32,
    pub stock_interval: NonZeroU32,
    pub stocks: Vec<String>,
    pub feed_timeout: Duration,
    /// `None` skips IP discovery and shows "No IP".
    pub probe_addr: Option<SocketAddr>,
}

impl DashboardConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            system_stats_interval: config.scheduler.system_stats_interval(),
            weather_interval: config.scheduler.weather_interval(),
            stock_interval: config.scheduler.stock_interval(),
            stocks: config.feeds.stocks.clone(),
            feed_timeout: config.feeds.timeout(),
            probe_addr: config.network.probe_addr(),
        }
    }
}

/// What one poll did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub bucket: MinuteBucket,
    pub refreshed: Vec<Source>,
    pub failed: Vec<Source>,
    pub redrawn: bool,
}

impl TickOutcome {
    fn new(bucket: MinuteBucket) -> Self {
        Self {
            bucket,
            refreshed: Vec::new(),
            failed: Vec::new(),
            redrawn: false,
        }
    }

    fn record(&mut self, source: Source, ok: bool) {
        if ok {
            self.refreshed.push(source);
        } else {
            self.failed.push(source);
        }
    }
}

pub struct Dashboard<Q, W, S, R> {
    telemetry: TelemetryRepo<Q>,
    weather_feed: W,
    quote_feed: S,
    renderer: R,
    system: RefreshState<SystemUsageSnapshot>,
    weather: RefreshState<WeatherReading>,
    stocks: Vec<(String, RefreshState<StockQuote>)>,
    gate: RenderGate,
    feed_timeout: Duration,
    probe_addr: Option<SocketAddr>,
}

impl<Q, W, S, R> Dashboard<Q, W, S, R>
where
    Q: CapacityQuery + 'static,
    W: WeatherFeed,
    S: QuoteFeed,
    R: Renderer,
{
    pub fn new(deps: DashboardDeps<Q, W, S, R>, config: DashboardConfig) -> Self {
        let DashboardDeps {
            telemetry,
            weather_feed,
            quote_feed,
            renderer,
        } = deps;
        let stocks = config
            .stocks
            .into_iter()
            .map(|symbol| (symbol, RefreshState::new(config.stock_interval)))
            .collect();
        Self {
            telemetry,
            weather_feed,
            quote_feed,
            renderer,
            system: RefreshState::new(config.system_stats_interval),
            weather: RefreshState::new(config.weather_interval),
            stocks,
            gate: RenderGate::new(),
            feed_timeout: config.feed_timeout,
            probe_addr: config.probe_addr,
        }
    }

    pub fn system_state(&self) -> &RefreshState<SystemUsageSnapshot> {
        &self.system
    }

    pub fn weather_state(&self) -> &RefreshState<WeatherReading> {
        &self.weather
    }

    pub fn stock_state(&self, symbol: &str) -> Option<&RefreshState<StockQuote>> {
        self.stocks
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, state)| state)
    }

    pub fn render_gate(&self) -> &RenderGate {
        &self.gate
    }

    /// One poll at wall-clock time `now`.
    pub async fn tick(&mut self, now: NaiveDateTime) -> TickOutcome {
        let bucket = MinuteBucket::from_datetime(&now);
        let mut outcome = TickOutcome::new(bucket);

        let system_due = self.system.is_due(bucket);
        let weather_due = self.weather.is_due(bucket);
        let due_stocks: Vec<usize> = self
            .stocks
            .iter()
            .enumerate()
            .filter(|(_, (_, state))| state.is_due(bucket))
            .map(|(index, _)| index)
            .collect();

        // Every due source is fetched at once, so a poll waits for at most one feed timeout.
        let (system_result, weather_result, quote_results) = {
            let timeout = self.feed_timeout;
            let telemetry = &self.telemetry;
            let weather_feed = &self.weather_feed;
            let quote_feed = &self.quote_feed;
            let stocks = &self.stocks;
            let system_sample = async move {
                if system_due {
                    Some(telemetry.sample_system_usage().await)
                } else {
                    None
                }
            };
            let weather_fetch = async move {
                if weather_due {
                    Some(fetch_with_timeout(timeout, weather_feed.current()).await)
                } else {
                    None
                }
            };
            let quote_fetches: Vec<_> = due_stocks
                .iter()
                .map(move |&index| {
                    fetch_with_timeout(timeout, quote_feed.quote(stocks[index].0.as_str()))
                })
                .collect();
            tokio::join!(system_sample, weather_fetch, join_all(quote_fetches))
        };

        if let Some(result) = system_result {
            let ok = match result {
                Ok(usage) => {
                    self.system.record_success(bucket, usage);
                    true
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        operation = "sample_system_usage",
                        source = %Source::SystemStats,
                        "system stats failed, keeping cached value"
                    );
                    false
                }
            };
            outcome.record(Source::SystemStats, ok);
        }

        if let Some(result) = weather_result {
            let ok = match result {
                Ok(reading) => {
                    self.weather.record_success(bucket, reading);
                    true
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        operation = "fetch_weather",
                        source = %Source::Weather,
                        "weather fetch failed, keeping cached value"
                    );
                    false
                }
            };
            outcome.record(Source::Weather, ok);
        }

        for (index, result) in due_stocks.into_iter().zip(quote_results) {
            let (symbol, state) = &mut self.stocks[index];
            let source = Source::Stock(symbol.clone());
            let ok = match result {
                Ok(quote) => {
                    state.record_success(bucket, quote);
                    true
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        operation = "fetch_quote",
                        source = %source,
                        "quote fetch failed, keeping cached value"
                    );
                    false
                }
            };
            outcome.record(source, ok);
        }

        if self.gate.should_redraw(bucket) {
            let frame = self.compose(&now);
            match self.renderer.render(&frame) {
                Ok(()) => {
                    self.gate.mark_rendered(bucket);
                    outcome.redrawn = true;
                }
                Err(e) => {
                    tracing::warn!(error = %e, operation = "render", %bucket, "render failed");
                }
            }
        }

        if !outcome.refreshed.is_empty() || !outcome.failed.is_empty() || outcome.redrawn {
            tracing::debug!(
                %bucket,
                refreshed = outcome.refreshed.len(),
                failed = outcome.failed.len(),
                redrawn = outcome.redrawn,
                "tick"
            );
        }
        outcome
    }

    pub fn compose(&self, now: &NaiveDateTime) -> Frame {
        let ip = self.probe_addr.and_then(network::local_ip_address);
        Frame::compose(
            now,
            ip,
            self.system.last_good(),
            self.weather.last_good(),
            self.stocks
                .iter()
                .map(|(symbol, state)| (symbol.as_str(), state.last_good())),
        )
    }

    /// Polls until `shutdown_rx` fires, then releases the renderer.
    #[tracing::instrument(
        name = "dashboard",
        skip_all,
        fields(poll_interval_ms = poll_interval.as_millis() as u64)
    )]
    pub async fn run(
        mut self,
        poll_interval: Duration,
        mut shutdown_rx: tokio::sync::oneshot::Receiver<()>,
    ) {
        let mut poll = interval(poll_interval);
        poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = poll.tick() => {
                    self.tick(chrono::Local::now().naive_local()).await;
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Dashboard shutting down");
                    break;
                }
            }
        }

        if let Err(e) = self.renderer.shutdown() {
            tracing::warn!(error = %e, operation = "renderer_shutdown", "failed to release display");
        }
    }
}

pub fn spawn<Q, W, S, R>(
    dashboard: Dashboard<Q, W, S, R>,
    poll_interval: Duration,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> tokio::task::JoinHandle<()>
where
    Q: CapacityQuery + 'static,
    W: WeatherFeed + 'static,
    S: QuoteFeed + 'static,
    R: Renderer + 'static,
{
    tokio::spawn(dashboard.run(poll_interval, shutdown_rx))
}
