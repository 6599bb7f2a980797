use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Envelope the client posts to `/submitReport`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitReportBodyDto {
    #[validate(nested)]
    pub report: SubmitReportDto,
}

/// One flood report as submitted by a citizen
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportDto {
    /// Coordinate pair in "lat,lng" form
    #[validate(length(min = 1, max = 64, message = "latLng must be 1-64 characters"))]
    pub lat_lng: String,

    /// Free-text description of the flooding
    #[validate(length(min = 1, max = 5000, message = "Description must be 1-5000 characters"))]
    pub desc: String,

    /// Optional photo, base64-encoded
    pub img: Option<String>,

    /// Manual street address. When absent the address is reverse-geocoded
    /// from the coordinates.
    #[validate(length(max = 512, message = "Location must not exceed 512 characters"))]
    pub location: Option<String>,
}

impl SubmitReportDto {
    /// Address supplied by the submitter, if any. A blank string counts as
    /// absent so the geocoder still backs it up.
    pub fn manual_address(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Response DTO for a stored report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub lat_lng: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    pub description: String,
    pub physical_address: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_body_deserializes_camel_case() {
        let body: SubmitReportBodyDto = serde_json::from_str(
            r#"{"report":{"latLng":"29.9,-90.1","desc":"flooded","img":null,"location":"123 Main St"}}"#,
        )
        .unwrap();

        assert_eq!(body.report.lat_lng, "29.9,-90.1");
        assert_eq!(body.report.desc, "flooded");
        assert!(body.report.img.is_none());
        assert_eq!(body.report.manual_address(), Some("123 Main St"));
    }

    #[test]
    fn test_manual_address_blank_counts_as_absent() {
        let dto = SubmitReportDto {
            lat_lng: "29.9,-90.1".to_string(),
            desc: "flooded".to_string(),
            img: None,
            location: Some("   ".to_string()),
        };
        assert_eq!(dto.manual_address(), None);

        let dto = SubmitReportDto {
            location: None,
            ..dto
        };
        assert_eq!(dto.manual_address(), None);
    }
}
