//! Readiness probe
//!
//! Polls the listing endpoint until it answers with a success status.

use std::time::Duration;

use crate::error::{ClientError, Result};

pub const DEFAULT_MAX_RETRIES: u32 = 10;
pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct ReadinessProbe {
    client: reqwest::Client,
    url: String,
    max_retries: u32,
    delay: Duration,
}

impl ReadinessProbe {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            url: crate::endpoint(base_url, "/files/"),
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_DELAY,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Poll until ready. Returns the 1-based attempt that succeeded.
    ///
    /// Connection failures and non-success statuses both count as "not yet
    /// ready". Running out of attempts is an error.
    pub async fn wait(&self) -> Result<u32> {
        for attempt in 1..=self.max_retries {
            match self.client.get(&self.url).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::info!(attempt = attempt, "API is up and running");
                    return Ok(attempt);
                }
                Ok(response) => {
                    tracing::info!(
                        attempt = attempt,
                        max_retries = self.max_retries,
                        status = %response.status(),
                        "Waiting for API"
                    );
                }
                Err(e) => {
                    tracing::info!(
                        attempt = attempt,
                        max_retries = self.max_retries,
                        error = %e,
                        "Waiting for API"
                    );
                }
            }

            if attempt < self.max_retries {
                tokio::time::sleep(self.delay).await;
            }
        }

        tracing::error!(url = %self.url, "API is not responding");
        Err(ClientError::NotReady {
            attempts: self.max_retries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkdrop_server::config::{Config, StorageConfig};
    use chunkdrop_server::routes;
    use chunkdrop_server::state::AppState;
    use tempfile::TempDir;

    fn probe(base_url: &str) -> ReadinessProbe {
        ReadinessProbe::new(reqwest::Client::new(), base_url)
            .with_max_retries(3)
            .with_delay(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_probe_gives_up_on_closed_port() {
        // Grab a free port, then release it so nothing is listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = probe(&format!("http://{}", addr)).wait().await;
        assert!(matches!(result, Err(ClientError::NotReady { attempts: 3 })));
    }

    #[tokio::test]
    async fn test_probe_succeeds_against_live_server() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            storage: StorageConfig::with_upload_dir(temp_dir.path()),
            ..Config::default()
        };
        let app = routes::router(AppState::new(&config).await.unwrap());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let attempt = probe(&format!("http://{}", addr)).wait().await.unwrap();
        assert_eq!(attempt, 1);
    }
}
