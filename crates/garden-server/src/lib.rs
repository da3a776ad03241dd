//! Garden Server - HTTP surface for the sound garden content service
//!
//! Every endpoint answers with JSON, including failures.

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{parse_quantity, AppState, PlantsResponse};

use axum::routing::{get, post};
use axum::Router;
use garden_core::Result;
use garden_gen::GardenService;
use std::sync::Arc;
use tracing::info;

/// Build the API router around a shared service
pub fn router(service: Arc<GardenService>) -> Router {
    Router::new()
        .route("/api/generate-plant", post(handlers::generate_plant))
        .route("/api/generate-rainbow", post(handlers::generate_rainbow))
        .route("/api/generate-weather", post(handlers::generate_weather))
        .route("/api/generate-aurora", post(handlers::generate_aurora))
        .route("/api/health", get(handlers::health))
        .with_state(service)
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(addr: &str, service: Arc<GardenService>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "garden server listening");
    axum::serve(listener, router(service)).await?;
    Ok(())
}
