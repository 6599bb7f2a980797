use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::users::services::UserService;
use crate::shared::types::ApiResponse;

/// Insert the hardcoded demo user
#[utoipa::path(
    get,
    path = "/addUser",
    responses(
        (status = 200, description = "Demo user inserted", body = ApiResponse<u64>),
        (status = 500, description = "Store error")
    ),
    tag = "users"
)]
pub async fn add_user(State(service): State<Arc<UserService>>) -> Result<Json<ApiResponse<u64>>> {
    let rows = service.insert_demo_user().await?;
    Ok(Json(ApiResponse::success(
        Some(rows),
        Some("Demo user inserted".to_string()),
    )))
}
