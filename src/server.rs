//! Axum router and server setup.
//! Used by: main.

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/analytics/kpis/", get(handlers::kpis::kpis))
        .route("/analytics/traffic/", get(handlers::traffic::traffic))
        .route("/analytics/signups/", get(handlers::signups::signups))
        .route("/analytics/revenue/", get(handlers::revenue::revenue))
        .route("/analytics/device-share/", get(handlers::device_share::device_share))
        .route("/health/", get(handlers::health::health))
        .route("/metrics", get(handlers::metrics::metrics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(state: AppState, addr: &str) -> std::io::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, router).await
}
