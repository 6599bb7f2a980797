use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::reports::dtos::ReportResponseDto;

/// Database model for a flood report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub lat_lng: String,
    pub img: Option<String>,
    pub description: String,
    pub physical_address: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a flood report
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub lat_lng: String,
    pub img: Option<String>,
    pub description: String,
    pub physical_address: String,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            lat_lng: r.lat_lng,
            img: r.img,
            description: r.description,
            physical_address: r.physical_address,
            created_at: r.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_dto_carries_fields_unmodified() {
        let report = Report {
            id: Uuid::now_v7(),
            lat_lng: "29.9,-90.1".to_string(),
            img: Some("http://cdn.example/photo.jpg".to_string()),
            description: "flooded".to_string(),
            physical_address: "123 Main St".to_string(),
            created_at: Utc::now(),
        };

        let dto: ReportResponseDto = report.clone().into();
        assert_eq!(dto.id, report.id);
        assert_eq!(dto.lat_lng, report.lat_lng);
        assert_eq!(dto.img, report.img);
        assert_eq!(dto.description, report.description);
        assert_eq!(dto.physical_address, report.physical_address);
        assert_eq!(dto.created_at, report.created_at);
    }
}
