use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::features::breweries::clients::BreweryClient;

/// Proxy the brewery listing
///
/// Answers 201 for historical reasons; the client depends on it.
#[utoipa::path(
    get,
    path = "/route",
    responses(
        (status = 201, description = "Brewery list passthrough"),
        (status = 502, description = "Brewery API unavailable")
    ),
    tag = "breweries"
)]
pub async fn list_breweries(
    State(client): State<Arc<BreweryClient>>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let breweries = client.list_breweries().await?;
    Ok((StatusCode::CREATED, Json(breweries)))
}
