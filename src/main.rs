use anyhow::Result;
use paperdash::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        stocks = app_config.feeds.stocks.len(),
        poll_interval_secs = app_config.scheduler.poll_interval_secs,
        "Starting {}",
        version::banner()
    );

    let telemetry = telemetry::TelemetryRepo::new(
        &app_config.sampling.proc_root,
        app_config.sampling.cpu_window(),
    );
    let dashboard = worker::Dashboard::new(
        worker::DashboardDeps {
            telemetry,
            weather_feed: feeds::DisabledFeed,
            quote_feed: feeds::DisabledFeed,
            renderer: renderer::LogRenderer::new(),
        },
        worker::DashboardConfig::from_app_config(&app_config),
    );

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let worker_handle = worker::spawn(
        dashboard,
        app_config.scheduler.poll_interval(),
        shutdown_rx,
    );

    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    tracing::info!("Received shutdown signal");
    let _ = shutdown_tx.send(());
    worker_handle.await?;
    Ok(())
}
