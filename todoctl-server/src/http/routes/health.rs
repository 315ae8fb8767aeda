//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::Connection;

use crate::http::server::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

/// GET /health
///
/// Opens and closes a connection the same way a request would.
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.store.connect().await {
        Ok(conn) => conn.close().await.map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    let (status, health, database) = match database {
        Ok(()) => (StatusCode::OK, "ok", "connected".to_string()),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", format!("error: {e}"))
        }
    };

    (
        status,
        Json(HealthResponse {
            status: health.to_string(),
            database,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
