use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::rainfall::handlers;
use crate::features::rainfall::services::RainfallService;

/// Create routes for the rainfall feature
pub fn routes(rainfall_service: Arc<RainfallService>) -> Router {
    Router::new()
        .route("/rainfall", get(handlers::get_rainfall))
        .with_state(rainfall_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::UpstreamConfig;
    use axum::{routing::get, Json};
    use axum_test::TestServer;
    use serde_json::json;

    /// Spin up a local stand-in for the forecast API
    async fn mock_forecast_api() -> String {
        let upstream = Router::new().route(
            "/v1/forecast",
            get(|| async { Json(json!({"hourly": {"precipitation": [1.0, 2.5, null, 0.5]}})) }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, upstream).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn upstream_config(rainfall_base_url: String) -> UpstreamConfig {
        UpstreamConfig {
            rainfall_base_url,
            station_lat: 29.9511,
            station_lng: -90.0715,
            geocoding_base_url: "http://localhost:1".to_string(),
            roads_base_url: "http://localhost:1".to_string(),
            roads_api_key: "test-key".to_string(),
            brewery_base_url: "http://localhost:1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_rainfall_endpoint_returns_bare_total() {
        let base_url = mock_forecast_api().await;
        let service = Arc::new(RainfallService::new(&upstream_config(base_url)).unwrap());

        let server = TestServer::new(routes(service)).unwrap();
        let response = server.get("/rainfall").await;

        response.assert_status_ok();
        let total: f64 = response.json();
        assert!((total - 4.0).abs() < f64::EPSILON);
    }
}
