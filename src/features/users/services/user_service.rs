use sqlx::PgPool;

use crate::core::error::{AppError, Result};

/// Service for the demo users table
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the hardcoded demo user and return the number of rows written.
    ///
    /// No uniqueness constraint at this layer; calling it twice inserts
    /// two rows.
    pub async fn insert_demo_user(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (first_name, last_name, email)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind("westo")
        .bind("pesto")
        .bind("wes@was.com")
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert demo user: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Inserted demo user ({} row)", result.rows_affected());

        Ok(result.rows_affected())
    }
}
