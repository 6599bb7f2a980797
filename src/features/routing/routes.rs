use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::reports::services::ReportService;
use crate::features::routing::clients::RoadsClient;
use crate::features::routing::handlers::{self, RoutingState};

/// Create routes for the flood-avoidance routing feature
pub fn routes(report_service: Arc<ReportService>, roads_client: Arc<RoadsClient>) -> Router {
    let state = RoutingState {
        report_service,
        roads_client,
    };

    Router::new()
        .route("/getMap", post(handlers::get_map))
        .with_state(state)
}
