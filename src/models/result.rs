//! Analysis result model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::engine::AnalysisResult;

/// Stored analysis output, one row per analyzed file (the analyze handler
/// checks for an existing row before recomputing).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnalysisResultRow {
    pub id: String,
    pub file_id: String,
    pub result: String,
    pub created_at: DateTime<Utc>,
}

impl AnalysisResultRow {
    pub async fn create(
        pool: &SqlitePool,
        file_id: &str,
        result_json: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, AnalysisResultRow>(
            r#"
            INSERT INTO analysis_results (id, file_id, result, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(file_id)
        .bind(result_json)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_file(
        pool: &SqlitePool,
        file_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, AnalysisResultRow>(
            "SELECT * FROM analysis_results WHERE file_id = $1 ORDER BY created_at LIMIT 1",
        )
        .bind(file_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, AnalysisResultRow>(
            "SELECT * FROM analysis_results ORDER BY created_at",
        )
        .fetch_all(pool)
        .await
    }

    /// Deserialize the stored JSON payload.
    pub fn analysis(&self) -> Result<AnalysisResult, serde_json::Error> {
        serde_json::from_str(&self.result)
    }
}
