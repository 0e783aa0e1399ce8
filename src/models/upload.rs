//! Uploaded file model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::engine::Dataset;

/// One uploaded CSV, with its parsed records stored as JSON text
/// (`{"records": [...]}`).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UploadedFile {
    pub id: String,
    pub filename: String,
    pub upload_date: DateTime<Utc>,
    pub data: String,
}

impl UploadedFile {
    pub async fn create(
        pool: &SqlitePool,
        id: &str,
        filename: &str,
        data_json: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, UploadedFile>(
            r#"
            INSERT INTO uploaded_files (id, filename, upload_date, data)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(filename)
        .bind(Utc::now())
        .bind(data_json)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, UploadedFile>("SELECT * FROM uploaded_files WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Deserialize the stored payload back into a dataset.
    pub fn dataset(&self) -> Result<Dataset, serde_json::Error> {
        serde_json::from_str(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{FieldValue, Record};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        // Single connection so the in-memory database is shared
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_upload_round_trip() {
        let pool = test_pool().await;

        let mut record = Record::default();
        record
            .fields
            .insert("aadhaar".to_string(), FieldValue::Text("111122223333".to_string()));
        record
            .fields
            .insert("amount".to_string(), FieldValue::Number(12000.0));
        let dataset = Dataset::new(vec![record]);
        let data_json = serde_json::to_string(&dataset).unwrap();

        let stored = UploadedFile::create(&pool, "file-1", "claims.csv", &data_json)
            .await
            .unwrap();
        assert_eq!(stored.id, "file-1");
        assert_eq!(stored.filename, "claims.csv");

        let found = UploadedFile::find_by_id(&pool, "file-1").await.unwrap().unwrap();
        let back = found.dataset().unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.records[0].number("amount"), Some(12000.0));
    }

    #[tokio::test]
    async fn test_find_missing_upload() {
        let pool = test_pool().await;
        assert!(UploadedFile::find_by_id(&pool, "nope").await.unwrap().is_none());
    }
}
