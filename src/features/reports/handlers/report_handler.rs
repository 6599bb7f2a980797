use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use base64::prelude::*;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{ReportResponseDto, SubmitReportBodyDto};
use crate::features::reports::models::CreateReport;
use crate::features::reports::services::{GeocodingService, ReportService};
use crate::modules::storage::ImageStore;
use crate::shared::constants::REPORT_RECEIVED_MESSAGE;
use crate::shared::geo::parse_lat_lng;

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
    pub geocoding_service: Arc<GeocodingService>,
    pub image_store: Arc<ImageStore>,
}

/// Submit a flood report
///
/// When no manual address is supplied the coordinates are reverse-geocoded;
/// when a photo is attached it is uploaded to object storage first and the
/// stored row references its durable URL. Any downstream failure aborts the
/// submission with the fixed 504 apology the client expects.
#[utoipa::path(
    post,
    path = "/submitReport",
    request_body = SubmitReportBodyDto,
    responses(
        (status = 201, description = "Report stored", body = String),
        (status = 400, description = "Validation error"),
        (status = 504, description = "Submission failed downstream")
    ),
    tag = "reports"
)]
pub async fn submit_report(
    State(state): State<ReportState>,
    AppJson(body): AppJson<SubmitReportBodyDto>,
) -> Result<(StatusCode, &'static str)> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let dto = body.report;

    // Manual address short-circuits the geocoder entirely
    let physical_address = match dto.manual_address() {
        Some(addr) => addr.to_string(),
        None => {
            let (lat, lng) = parse_lat_lng(&dto.lat_lng).ok_or_else(|| {
                AppError::Validation(format!(
                    "latLng '{}' is not a valid \"lat,lng\" pair",
                    dto.lat_lng
                ))
            })?;
            state
                .geocoding_service
                .reverse(lat, lng)
                .await
                .map_err(as_submission_failure)?
        }
    };

    let img = match dto.img.as_deref() {
        Some(encoded) => {
            let bytes = BASE64_STANDARD.decode(encoded).map_err(|e| {
                AppError::Validation(format!("img is not valid base64: {}", e))
            })?;
            let url = state
                .image_store
                .upload_image(&bytes)
                .await
                .map_err(as_submission_failure)?;
            Some(url)
        }
        None => None,
    };

    let create = CreateReport {
        lat_lng: dto.lat_lng,
        img,
        description: dto.desc,
        physical_address,
    };

    state
        .report_service
        .create(&create)
        .await
        .map_err(as_submission_failure)?;

    Ok((StatusCode::CREATED, REPORT_RECEIVED_MESSAGE))
}

/// List every stored flood report
///
/// Called by the client whenever it renders a map.
#[utoipa::path(
    get,
    path = "/floodReports",
    responses(
        (status = 200, description = "All stored reports", body = Vec<ReportResponseDto>),
        (status = 500, description = "Store error")
    ),
    tag = "reports"
)]
pub async fn list_flood_reports(
    State(state): State<ReportState>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    let reports = state.report_service.list_all().await?;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(dtos))
}

/// Downstream failures during submission keep the endpoint's 504 contract;
/// caller input errors pass through untouched.
fn as_submission_failure(e: AppError) -> AppError {
    match e {
        AppError::Validation(_) | AppError::BadRequest(_) => e,
        other => AppError::SubmissionFailed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downstream_errors_become_submission_failures() {
        let mapped = as_submission_failure(AppError::ExternalServiceError("down".to_string()));
        assert!(matches!(mapped, AppError::SubmissionFailed(_)));

        let mapped = as_submission_failure(AppError::Internal("boom".to_string()));
        assert!(matches!(mapped, AppError::SubmissionFailed(_)));
    }

    #[test]
    fn test_input_errors_pass_through() {
        let mapped = as_submission_failure(AppError::Validation("bad latLng".to_string()));
        assert!(matches!(mapped, AppError::Validation(_)));
    }
}
