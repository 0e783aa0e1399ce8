//! CSV upload handler

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::engine::{Dataset, FieldValue, Record};
use crate::middleware::auth::UserContext;
use crate::models::UploadedFile;
use crate::{AppError, AppResult, AppState};

/// Columns the engine's rules and features key off; enforced here, never
/// inside the engine.
const REQUIRED_COLUMNS: [&str; 3] = ["aadhaar", "amount", "income"];

const PREVIEW_ROWS: usize = 10;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_id: String,
    pub filename: String,
    pub total_rows: usize,
    pub preview_rows: Vec<Record>,
    pub message: String,
}

/// Accept a multipart CSV, parse it into typed records and persist it.
pub async fn upload(
    State(state): State<AppState>,
    _user: UserContext,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut filename = None;
    let mut content = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(e.to_string()))?
    {
        if field.name() == Some("file") {
            filename = field.file_name().map(|s| s.to_string());
            content = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::ValidationError(e.to_string()))?,
            );
        }
    }

    let filename = filename.ok_or_else(|| {
        AppError::ValidationError("Missing multipart field 'file'".to_string())
    })?;
    let content =
        content.ok_or_else(|| AppError::ValidationError("Empty upload".to_string()))?;

    if !filename.to_lowercase().ends_with(".csv") {
        return Err(AppError::UnsupportedFileType(
            "Only CSV files are supported".to_string(),
        ));
    }

    let dataset = parse_csv(&content)?;

    let file_id = Uuid::new_v4().to_string();
    let data_json = serde_json::to_string(&dataset)?;
    UploadedFile::create(&state.pool, &file_id, &filename, &data_json).await?;

    tracing::info!(%file_id, %filename, rows = dataset.len(), "CSV upload stored");

    let preview_rows = dataset
        .records
        .iter()
        .take(PREVIEW_ROWS)
        .cloned()
        .collect();

    Ok(Json(UploadResponse {
        file_id,
        filename,
        total_rows: dataset.len(),
        preview_rows,
        message: "File uploaded successfully".to_string(),
    }))
}

/// Parse CSV bytes into a dataset, typing each cell and checking the header
/// for the required columns.
fn parse_csv(content: &[u8]) -> Result<Dataset, AppError> {
    let mut reader = csv::Reader::from_reader(content);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::ValidationError(format!("Invalid CSV: {}", e)))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h == *c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AppError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| AppError::ValidationError(format!("Invalid CSV: {}", e)))?;
        let mut record = Record::default();
        for (header, cell) in headers.iter().zip(row.iter()) {
            record
                .fields
                .insert(header.clone(), FieldValue::from_csv_cell(cell));
        }
        records.push(record);
    }

    Ok(Dataset::new(records))
}
