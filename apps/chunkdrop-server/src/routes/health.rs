//! Health check endpoint
//!
//! Reports whether the upload directory is still present. Uploads and
//! listings both fail without it, so a missing directory answers 503.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    /// Upload directory exists and is a directory
    pub upload_dir: bool,
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let path = state.upload_dir().path();
    let upload_dir = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata.is_dir(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Upload directory unavailable");
            false
        }
    };

    let (code, status) = if upload_dir {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        service: "chunkdrop-server",
        upload_dir,
    };
    (code, Json(body))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
