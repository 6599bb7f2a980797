use serde::Deserialize;
use std::time::Duration;

use crate::core::error::{AppError, Result};
use crate::features::routing::services::GeoPoint;
use crate::shared::constants::UPSTREAM_TIMEOUT_SECS;
use crate::shared::retry::with_retry;

/// Roads API `snapToRoads` response structure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapToRoadsResponse {
    #[serde(default)]
    pub snapped_points: Vec<SnappedPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnappedPoint {
    pub location: SnappedLocation,
}

#[derive(Debug, Deserialize)]
pub struct SnappedLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Client for the road-snapping API.
///
/// Takes the planner's raw geometric path and aligns it to the nearest
/// legal road segments.
pub struct RoadsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RoadsClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("FloodwatchCore/0.1 (flood-report-system)")
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Snap an ordered path to roads.
    ///
    /// The first and last snapped points are dropped: the waypoint list
    /// excludes origin and destination, and callers re-add them when they
    /// need the full route.
    pub async fn snap_to_roads(&self, path: &[GeoPoint]) -> Result<Vec<GeoPoint>> {
        let url = format!(
            "{}/v1/snapToRoads?path={}&interpolate=true&key={}",
            self.base_url,
            urlencoding::encode(&format_path(path)),
            self.api_key
        );

        let response = with_retry("road snapping", || self.execute_request(&url)).await?;

        Ok(trim_endpoints(response))
    }

    async fn execute_request(&self, url: &str) -> Result<SnapToRoadsResponse> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Roads request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Roads request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Roads API returned status: {}", status);
            let message = format!("Roads API returned status {}", status);
            // Only 5xx answers are worth retrying
            return Err(if status.is_server_error() {
                AppError::ExternalServiceError(message)
            } else {
                AppError::UpstreamRejected(message)
            });
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse roads response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse roads response: {}", e))
        })
    }
}

/// Format a path as the Roads API expects: "lat,lng|lat,lng|…"
fn format_path(path: &[GeoPoint]) -> String {
    path.iter()
        .map(|p| format!("{},{}", p.lat, p.lng))
        .collect::<Vec<_>>()
        .join("|")
}

/// Drop the first and last snapped points (origin/destination)
fn trim_endpoints(response: SnapToRoadsResponse) -> Vec<GeoPoint> {
    let points: Vec<GeoPoint> = response
        .snapped_points
        .into_iter()
        .map(|p| GeoPoint {
            lat: p.location.latitude,
            lng: p.location.longitude,
        })
        .collect();

    if points.len() <= 2 {
        return Vec::new();
    }
    points[1..points.len() - 1].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapped(points: &[(f64, f64)]) -> SnapToRoadsResponse {
        SnapToRoadsResponse {
            snapped_points: points
                .iter()
                .map(|&(lat, lng)| SnappedPoint {
                    location: SnappedLocation {
                        latitude: lat,
                        longitude: lng,
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn test_format_path() {
        let path = vec![
            GeoPoint {
                lat: 29.9,
                lng: -90.1,
            },
            GeoPoint {
                lat: 30.0,
                lng: -90.0,
            },
        ];
        assert_eq!(format_path(&path), "29.9,-90.1|30,-90");
    }

    #[test]
    fn test_trim_endpoints_drops_first_and_last() {
        let trimmed = trim_endpoints(snapped(&[
            (29.90, -90.10),
            (29.95, -90.05),
            (29.97, -90.03),
            (30.00, -90.00),
        ]));

        assert_eq!(trimmed.len(), 2);
        assert!((trimmed[0].lat - 29.95).abs() < f64::EPSILON);
        assert!((trimmed[1].lat - 29.97).abs() < f64::EPSILON);
    }

    #[test]
    fn test_trim_endpoints_short_paths_are_empty() {
        assert!(trim_endpoints(snapped(&[])).is_empty());
        assert!(trim_endpoints(snapped(&[(29.9, -90.1)])).is_empty());
        assert!(trim_endpoints(snapped(&[(29.9, -90.1), (30.0, -90.0)])).is_empty());
    }

    #[tokio::test]
    async fn test_snap_to_roads_trims_origin_and_destination() {
        use axum::{routing::get, Json, Router};
        use serde_json::json;

        let upstream = Router::new().route(
            "/v1/snapToRoads",
            get(|| async {
                Json(json!({
                    "snappedPoints": [
                        {"location": {"latitude": 29.90, "longitude": -90.10}},
                        {"location": {"latitude": 29.95, "longitude": -90.05}},
                        {"location": {"latitude": 30.00, "longitude": -90.00}}
                    ]
                }))
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, upstream).await.unwrap();
        });

        let client =
            RoadsClient::new(format!("http://{}", addr), "test-key".to_string()).unwrap();
        let path = vec![
            GeoPoint {
                lat: 29.90,
                lng: -90.10,
            },
            GeoPoint {
                lat: 30.00,
                lng: -90.00,
            },
        ];

        let snapped = client.snap_to_roads(&path).await.unwrap();

        assert_eq!(snapped.len(), 1);
        assert!((snapped[0].lat - 29.95).abs() < f64::EPSILON);
        assert!((snapped[0].lng + 90.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snap_response_parses_api_shape() {
        let json = r#"{
            "snappedPoints": [
                {"location": {"latitude": 29.95, "longitude": -90.05}, "originalIndex": 0, "placeId": "abc"}
            ]
        }"#;
        let parsed: SnapToRoadsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.snapped_points.len(), 1);
        assert!((parsed.snapped_points[0].location.latitude - 29.95).abs() < f64::EPSILON);
    }
}
