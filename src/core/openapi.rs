use utoipa::{Modify, OpenApi};

use crate::features::breweries::handlers as breweries_handlers;
use crate::features::rainfall::handlers as rainfall_handlers;
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::routing::{dtos as routing_dtos, handlers as routing_handlers};
use crate::features::users::handlers as users_handlers;
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Rainfall
        rainfall_handlers::rainfall_handler::get_rainfall,
        // Reports
        reports_handlers::report_handler::submit_report,
        reports_handlers::report_handler::list_flood_reports,
        // Users
        users_handlers::user_handler::add_user,
        // Routing
        routing_handlers::route_handler::get_map,
        // Breweries
        breweries_handlers::brewery_handler::list_breweries,
    ),
    components(
        schemas(
            ApiResponse<u64>,
            reports_dtos::SubmitReportBodyDto,
            reports_dtos::SubmitReportDto,
            reports_dtos::ReportResponseDto,
            routing_dtos::MapRequestBodyDto,
            routing_dtos::MapRequestDto,
            routing_dtos::LatLngDto,
            routing_dtos::WaypointDto,
            routing_dtos::RouteResponseDto,
        )
    ),
    tags(
        (name = "rainfall", description = "Aggregate rainfall totals"),
        (name = "reports", description = "Crowd-sourced flood reports"),
        (name = "users", description = "Demo user insertion"),
        (name = "routing", description = "Flood-avoidance routing"),
        (name = "breweries", description = "Brewery listing passthrough (vestigial)"),
    ),
    info(
        title = "Floodwatch API",
        version = "0.1.0",
        description = "API documentation for Floodwatch",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
