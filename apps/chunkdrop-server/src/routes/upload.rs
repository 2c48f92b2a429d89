//! Upload Routes
//!
//! Endpoints:
//! - POST /upload/ - Stream a multipart `file` field into the upload directory

use std::io;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use futures::TryStreamExt;
use tokio_util::io::StreamReader;

use crate::error::Result;
use crate::state::AppState;
use crate::upload::{UploadError, UploadRequest, UploadResponse};

/// Create the upload router
///
/// The default body limit is lifted here: the handler bounds memory itself.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_file))
        .route("/upload/", post(upload_file))
        .layer(DefaultBodyLimit::disable())
}

/// POST /upload/
///
/// Stores the first field named `file`. Other fields are skipped.
async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        UploadError::BadRequest(format!("Failed to parse multipart data: {}", e))
    })? {
        if field.name() != Some("file") {
            tracing::debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let body = StreamReader::new(field.map_err(|e| io::Error::new(io::ErrorKind::Other, e)));
        tokio::pin!(body);

        let response = state
            .uploads()
            .handle_upload(UploadRequest::new(filename, body))
            .await?;

        return Ok(Json(response));
    }

    Err(UploadError::BadRequest("Missing required multipart field 'file'".to_string()).into())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use tempfile::TempDir;

    use crate::routes::test_support::{post_upload, test_app};
    use crate::upload::UploadResponse;

    #[tokio::test]
    async fn test_upload_valid_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir, 1024).await;

        for filename in ["test.txt", "image.png", "video.mp4"] {
            let (status, json) =
                post_upload(app.clone(), "/upload/", "file", filename, b"dummy content").await;
            assert_eq!(status, StatusCode::OK);

            let response: UploadResponse = serde_json::from_value(json).unwrap();
            assert_eq!(response.filename, filename);

            let stored = std::path::PathBuf::from(&response.location);
            assert!(stored.exists());
            assert_eq!(stored.file_name().unwrap(), filename);
            assert_eq!(std::fs::read(&stored).unwrap(), b"dummy content");
        }
    }

    #[tokio::test]
    async fn test_upload_without_trailing_slash() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir, 1024).await;

        let (status, json) = post_upload(app, "/upload", "file", "a.pdf", b"%PDF").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["filename"], "a.pdf");
    }

    #[tokio::test]
    async fn test_upload_invalid_extension() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir, 1024).await;

        let (status, json) = post_upload(
            app,
            "/upload/",
            "file",
            "test_invalid.extension",
            b"dummy content",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "File type not allowed");
        assert_eq!(json["code"], "INVALID_FILE_TYPE");
        assert!(json.get("location").is_none());
        assert_eq!(
            std::fs::read_dir(temp_dir.path().join("uploads")).unwrap().count(),
            0
        );
    }

    #[tokio::test]
    async fn test_upload_spanning_many_chunks() {
        let temp_dir = TempDir::new().unwrap();
        // 25 chunks of 1KB plus a remainder
        let app = test_app(&temp_dir, 1024).await;
        let content: Vec<u8> = (0..25 * 1024 + 17).map(|i| (i % 256) as u8).collect();

        let (status, json) =
            post_upload(app, "/upload/", "file", "test_large_file.mp4", &content).await;
        assert_eq!(status, StatusCode::OK);

        let stored = std::fs::read(json["location"].as_str().unwrap()).unwrap();
        assert_eq!(stored.len(), content.len());
        assert_eq!(stored, content);
    }

    #[tokio::test]
    async fn test_upload_missing_file_field() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir, 1024).await;

        let (status, json) = post_upload(app, "/upload/", "other", "a.txt", b"data").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(
            std::fs::read_dir(temp_dir.path().join("uploads")).unwrap().count(),
            0
        );
    }

    #[tokio::test]
    async fn test_upload_storage_failure() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir, 1024).await;
        std::fs::remove_dir(temp_dir.path().join("uploads")).unwrap();

        let (status, json) = post_upload(app, "/upload/", "file", "a.txt", b"data").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "STORAGE_ERROR");
        let detail = json["detail"].as_str().unwrap();
        assert!(detail.starts_with("Error saving file: "), "detail was {detail:?}");
        assert!(json.get("location").is_none());
    }
}
