use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::rainfall::services::RainfallService;

/// Fetch the aggregate rainfall total for the configured station
///
/// The response body is the bare number; the client plots it directly.
#[utoipa::path(
    get,
    path = "/rainfall",
    responses(
        (status = 200, description = "Precipitation total in millimeters", body = f64),
        (status = 502, description = "Rainfall API unavailable")
    ),
    tag = "rainfall"
)]
pub async fn get_rainfall(State(service): State<Arc<RainfallService>>) -> Result<Json<f64>> {
    let total = service.total_rainfall().await?;
    Ok(Json(total))
}
