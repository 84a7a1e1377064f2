use anyhow::Result;
use statchart::*;
use std::sync::Arc;
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

    let base_path = std::path::Path::new(&app_config.statistics.base_path);
    if !base_path.is_dir() {
        tracing::warn!(
            path = %base_path.display(),
            "statistics base path does not exist yet; charts will be empty until it is populated"
        );
    }

    let aggregator = Arc::new(SeriesAggregator::new(
        topology::StaticTopology::new(app_config.cluster.hosts.clone()),
        statistics_repo::StatisticsRepo::new(&app_config.statistics.base_path),
        SeriesExtractor::new(app_config.statistics.timestamp_format.clone()),
    ));
    tracing::info!(
        hosts = app_config.cluster.hosts.len(),
        base_path = %app_config.statistics.base_path,
        "statistics sources configured"
    );

    let app = routes::app(aggregator, app_config.clone());
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Received shutdown signal");
}
