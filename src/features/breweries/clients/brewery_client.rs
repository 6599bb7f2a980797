use std::time::Duration;

use crate::core::error::{AppError, Result};
use crate::shared::constants::UPSTREAM_TIMEOUT_SECS;
use crate::shared::retry::with_retry;

/// Client for the Open Brewery DB listing
pub struct BreweryClient {
    client: reqwest::Client,
    base_url: String,
}

impl BreweryClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("FloodwatchCore/0.1 (flood-report-system)")
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Fetch the brewery listing, passed through untouched
    pub async fn list_breweries(&self) -> Result<serde_json::Value> {
        let url = format!("{}/breweries", self.base_url);

        with_retry("brewery listing", || self.execute_request(&url)).await
    }

    async fn execute_request(&self, url: &str) -> Result<serde_json::Value> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Brewery request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Brewery request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Brewery API returned status: {}", status);
            let message = format!("Brewery API returned status {}", status);
            // Only 5xx answers are worth retrying
            return Err(if status.is_server_error() {
                AppError::ExternalServiceError(message)
            } else {
                AppError::UpstreamRejected(message)
            });
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse brewery response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse brewery response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::UPSTREAM_RETRY_ATTEMPTS;
    use axum::{extract::State, http::StatusCode, routing::get, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Mock upstream answering every request with `status`, counting hits
    async fn mock_upstream(status: StatusCode) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let upstream = Router::new()
            .route(
                "/breweries",
                get(move |State(hits): State<Arc<AtomicUsize>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    status
                }),
            )
            .with_state(Arc::clone(&hits));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, upstream).await.unwrap();
        });

        (format!("http://{}", addr), hits)
    }

    #[tokio::test]
    async fn test_client_errors_hit_upstream_once() {
        let (base_url, hits) = mock_upstream(StatusCode::NOT_FOUND).await;
        let client = BreweryClient::new(base_url).unwrap();

        let result = client.list_breweries().await;

        assert!(matches!(result, Err(AppError::UpstreamRejected(_))));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_errors_spend_the_retry_budget() {
        let (base_url, hits) = mock_upstream(StatusCode::INTERNAL_SERVER_ERROR).await;
        let client = BreweryClient::new(base_url).unwrap();

        let result = client.list_breweries().await;

        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
        assert_eq!(
            hits.load(Ordering::SeqCst),
            UPSTREAM_RETRY_ATTEMPTS as usize + 1
        );
    }
}
