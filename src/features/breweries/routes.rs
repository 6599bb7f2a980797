use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::breweries::clients::BreweryClient;
use crate::features::breweries::handlers;

/// Create routes for the brewery passthrough
pub fn routes(brewery_client: Arc<BreweryClient>) -> Router {
    Router::new()
        .route("/route", get(handlers::list_breweries))
        .with_state(brewery_client)
}
