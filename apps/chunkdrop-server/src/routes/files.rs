//! File listing routes
//!
//! Lists everything currently in the upload directory.

use axum::{extract::State, routing::get, Json, Router};

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::storage::FileEntry;

/// Create the files router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/files", get(list_files))
        .route("/files/", get(list_files))
}

/// GET /files/
async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<FileEntry>>> {
    let files = state
        .upload_dir()
        .list_files()
        .await
        .map_err(AppError::Listing)?;

    Ok(Json(files))
}
