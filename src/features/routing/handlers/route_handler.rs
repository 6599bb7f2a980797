use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::reports::services::ReportService;
use crate::features::routing::clients::RoadsClient;
use crate::features::routing::dtos::{MapRequestBodyDto, RouteResponseDto, WaypointDto};
use crate::features::routing::services::plan_route;

/// State for routing handlers
#[derive(Clone)]
pub struct RoutingState {
    pub report_service: Arc<ReportService>,
    pub roads_client: Arc<RoadsClient>,
}

/// Compute a road-snapped route that avoids flooded areas
///
/// All current flood reports buffer into 0.5-mile obstacle disks; the
/// returned waypoints exclude origin and destination (the client re-adds
/// them around the snapped segment).
#[utoipa::path(
    post,
    path = "/getMap",
    request_body = MapRequestBodyDto,
    responses(
        (status = 201, description = "Route computed", body = RouteResponseDto),
        (status = 422, description = "No obstacle-free route exists"),
        (status = 502, description = "Road-snapping API unavailable")
    ),
    tag = "routing"
)]
pub async fn get_map(
    State(state): State<RoutingState>,
    AppJson(body): AppJson<MapRequestBodyDto>,
) -> Result<(StatusCode, Json<RouteResponseDto>)> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let request = body.map_req_info;

    let reports = state.report_service.list_all().await?;

    let path = plan_route(
        request.origin.into(),
        request.destination.into(),
        reports.iter().map(|r| r.lat_lng.as_str()),
    )?;

    let snapped = state.roads_client.snap_to_roads(&path).await?;

    let waypoints: Vec<WaypointDto> = snapped.into_iter().map(|p| p.into()).collect();

    tracing::info!(
        "Planned route with {} obstacle-aware waypoints from {} reports",
        waypoints.len(),
        reports.len()
    );

    Ok((StatusCode::CREATED, Json(RouteResponseDto { waypoints })))
}
