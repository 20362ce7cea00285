use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{feed::FeedController, health};
use crate::infrastructure::config::Config;
use crate::infrastructure::middleware::request_id_middleware;

/// Build the router from the given controllers
pub fn create_router(feed_controller: Arc<FeedController>) -> Router {
    // `/health` is a static route and wins over `/:username`
    let feed_routes = Router::new()
        .route("/", get(FeedController::following_feed_without_user))
        .route("/:username", get(FeedController::following_feed))
        .with_state(feed_controller);

    Router::new()
        .route("/health", get(health::health))
        .merge(feed_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    feed_controller: Arc<FeedController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(feed_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
