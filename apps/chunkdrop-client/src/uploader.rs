//! Streaming multipart uploader

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::{Body, StatusCode};
use tokio_util::io::ReaderStream;

use crate::error::Result;

/// What the server answered
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub status: StatusCode,
    /// Parsed JSON body, or `None` when the body was not JSON
    pub json: Option<serde_json::Value>,
}

/// Default remote name: `large_file_<random>.txt`
pub fn random_upload_name() -> String {
    format!("large_file_{}.txt", rand::random::<f64>())
}

/// Stream the file at `path` to `{base_url}/upload/` as the `file` field.
///
/// The file is read incrementally; it is never loaded into memory whole.
pub async fn upload_file(
    client: &reqwest::Client,
    base_url: &str,
    path: impl AsRef<Path>,
    name: &str,
) -> Result<UploadOutcome> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path).await?;
    let length = file.metadata().await?.len();

    let body = Body::wrap_stream(ReaderStream::new(file));
    let part = Part::stream_with_length(body, length)
        .file_name(name.to_string())
        .mime_str("text/plain")?;
    let form = Form::new().part("file", part);

    let url = crate::endpoint(base_url, "/upload/");
    tracing::info!(url = %url, name = %name, bytes = length, "Uploading file");

    let response = client.post(&url).multipart(form).send().await?;
    let status = response.status();
    let text = response.text().await?;
    let json = serde_json::from_str(&text).ok();

    tracing::info!(status = %status, "Upload response");
    Ok(UploadOutcome { status, json })
}
