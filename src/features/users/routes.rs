use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Create routes for the demo users feature
pub fn routes(user_service: Arc<UserService>) -> Router {
    Router::new()
        .route("/addUser", get(handlers::add_user))
        .with_state(user_service)
}
