use anyhow::{anyhow, Context};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use shotfeed::controllers::feed::FeedController;
use shotfeed::domain::feed::FeedService;
use shotfeed::infrastructure::config::{Config, LogFormat};
use shotfeed::infrastructure::dribbble::DribbbleClient;
use shotfeed::infrastructure::http::start_http_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow!("invalid configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        development = config.is_development(),
        "Starting shotfeed on {}:{}",
        config.host,
        config.port
    );

    // Upstream client
    let dribbble_client = DribbbleClient::new(
        config.dribbble_api_url.clone(),
        config.upstream_timeout(),
        config.debug_requests,
    )
    .context("failed to build HTTP client")?;

    tracing::info!(
        api_url = %config.dribbble_api_url,
        timeout_secs = config.upstream_timeout_secs,
        debug_requests = dribbble_client.is_debug(),
        "Dribbble client initialized"
    );

    if dribbble_client.is_debug() {
        tracing::warn!("Debug mode enabled: feeds return upstream URLs instead of RSS");
    }

    let config = Arc::new(config);

    // Service and controller
    let feed_service = Arc::new(FeedService::new(Arc::new(dribbble_client)));
    let feed_controller = Arc::new(FeedController::new(feed_service));

    start_http_server(config, feed_controller)
        .await
        .map_err(|e| anyhow!("server error: {}", e))?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "shotfeed=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "shotfeed=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
