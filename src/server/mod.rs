pub mod error;
pub mod handlers;
pub mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::pipeline::AnalysisPipeline;

/// Long-lived dependencies shared across requests. The backend clients
/// inside the pipeline hold no request state and are safe to share.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnalysisPipeline>,
    pub max_image_bytes: usize,
}

pub fn create_app(state: AppState) -> Router {
    // Base64 expands the image by ~4/3; leave headroom over the decoded cap
    // so oversized payloads reach the field-level validation.
    let body_limit = state.max_image_bytes * 2;

    Router::new()
        .route("/health", get(handlers::health))
        .route("/analyze-image", post(handlers::analyze_image))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(
    addr: SocketAddr,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting server on {}", addr);

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API endpoint: http://{}/analyze-image", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
