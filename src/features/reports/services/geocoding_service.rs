use serde::Deserialize;
use std::time::Duration;

use crate::core::error::{AppError, Result};
use crate::shared::constants::UPSTREAM_TIMEOUT_SECS;
use crate::shared::retry::with_retry;

/// Nominatim reverse-geocoding response structure
#[derive(Debug, Deserialize)]
pub struct NominatimReverseResponse {
    pub display_name: Option<String>,
    pub error: Option<String>,
}

/// Service for reverse geocoding coordinates into postal addresses.
///
/// Used to back-fill `physical_address` when the submitter did not supply
/// a manual address.
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodingService {
    pub fn new(base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("FloodwatchCore/0.1 (flood-report-system)")
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Resolve a coordinate pair into a postal address string
    pub async fn reverse(&self, lat: f64, lng: f64) -> Result<String> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.base_url, lat, lng
        );

        tracing::debug!("Reverse geocoding: ({}, {}) -> {}", lat, lng, url);

        let response = with_retry("reverse geocoding", || self.execute_request(&url)).await?;

        if let Some(err) = response.error {
            // Nominatim answers 200 with an error body for unmappable points
            return Err(AppError::ExternalServiceError(format!(
                "Geocoder could not resolve ({}, {}): {}",
                lat, lng, err
            )));
        }

        response.display_name.ok_or_else(|| {
            AppError::ExternalServiceError(format!(
                "Geocoder returned no address for ({}, {})",
                lat, lng
            ))
        })
    }

    async fn execute_request(&self, url: &str) -> Result<NominatimReverseResponse> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Nominatim request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Nominatim request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Nominatim returned status: {}", status);
            let message = format!("Nominatim returned status {}", status);
            // Only 5xx answers are worth retrying
            return Err(if status.is_server_error() {
                AppError::ExternalServiceError(message)
            } else {
                AppError::UpstreamRejected(message)
            });
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Nominatim response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse Nominatim response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_response_parses_display_name() {
        let json = r#"{"place_id":12345,"display_name":"123 Main St, New Orleans, LA","lat":"29.9","lon":"-90.1"}"#;
        let parsed: NominatimReverseResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.display_name.as_deref(),
            Some("123 Main St, New Orleans, LA")
        );
        assert!(parsed.error.is_none());
    }

    #[test]
    fn test_reverse_response_parses_error_body() {
        let json = r#"{"error":"Unable to geocode"}"#;
        let parsed: NominatimReverseResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.display_name.is_none());
        assert_eq!(parsed.error.as_deref(), Some("Unable to geocode"));
    }
}
