use serde::Deserialize;
use std::time::Duration;

use crate::core::config::UpstreamConfig;
use crate::core::error::{AppError, Result};
use crate::shared::constants::UPSTREAM_TIMEOUT_SECS;
use crate::shared::retry::with_retry;

/// Forecast API response structure (Open-Meteo shape)
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub hourly: HourlyForecast,
}

#[derive(Debug, Deserialize)]
pub struct HourlyForecast {
    /// Hourly precipitation in millimeters; null entries appear for hours
    /// the station has no reading for
    pub precipitation: Vec<Option<f64>>,
}

impl ForecastResponse {
    /// Total precipitation across the returned window
    pub fn total_precipitation(&self) -> f64 {
        self.hourly.precipitation.iter().flatten().sum()
    }
}

/// Service for aggregate rainfall totals at the configured station
pub struct RainfallService {
    client: reqwest::Client,
    base_url: String,
    station_lat: f64,
    station_lng: f64,
}

impl RainfallService {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("FloodwatchCore/0.1 (flood-report-system)")
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.rainfall_base_url.clone(),
            station_lat: config.station_lat,
            station_lng: config.station_lng,
        })
    }

    /// Fetch the precipitation total for the past day at the station
    pub async fn total_rainfall(&self) -> Result<f64> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&hourly=precipitation&past_days=1&forecast_days=1",
            self.base_url, self.station_lat, self.station_lng
        );

        tracing::debug!("Fetching rainfall total: {}", url);

        let forecast = with_retry("rainfall fetch", || self.execute_request(&url)).await?;

        Ok(forecast.total_precipitation())
    }

    async fn execute_request(&self, url: &str) -> Result<ForecastResponse> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Rainfall request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Rainfall request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Rainfall API returned status: {}", status);
            let message = format!("Rainfall API returned status {}", status);
            // Only 5xx answers are worth retrying
            return Err(if status.is_server_error() {
                AppError::ExternalServiceError(message)
            } else {
                AppError::UpstreamRejected(message)
            });
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse rainfall response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse rainfall response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_precipitation_sums_hours() {
        let forecast: ForecastResponse = serde_json::from_str(
            r#"{"hourly":{"precipitation":[0.0,1.5,2.0,0.5]}}"#,
        )
        .unwrap();
        assert!((forecast.total_precipitation() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_precipitation_skips_null_readings() {
        let forecast: ForecastResponse = serde_json::from_str(
            r#"{"hourly":{"precipitation":[1.0,null,2.0]}}"#,
        )
        .unwrap();
        assert!((forecast.total_precipitation() - 3.0).abs() < f64::EPSILON);
    }
}
