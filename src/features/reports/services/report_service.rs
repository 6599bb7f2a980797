use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CreateReport, Report};

/// Service for flood report persistence
pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert one flood report and return the stored row.
    ///
    /// Insert failures propagate to the caller; a report the citizen
    /// believes was filed must never be silently dropped.
    pub async fn create(&self, data: &CreateReport) -> Result<Report> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (lat_lng, img, description, physical_address)
            VALUES ($1, $2, $3, $4)
            RETURNING id, lat_lng, img, description, physical_address, created_at
            "#,
        )
        .bind(&data.lat_lng)
        .bind(&data.img)
        .bind(&data.description)
        .bind(&data.physical_address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created report: {} at {}",
            report.id,
            report.lat_lng
        );

        Ok(report)
    }

    /// Fetch every stored report, oldest first.
    ///
    /// No pagination: the map client renders the full set on every load.
    pub async fn list_all(&self) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, lat_lng, img, description, physical_address, created_at
            FROM reports
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })
    }
}
