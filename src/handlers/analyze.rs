//! Analysis handler

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::engine::{AnalysisResult, FraudDetector};
use crate::middleware::auth::UserContext;
use crate::models::{AnalysisResultRow, UploadedFile};
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub file_id: String,
}

/// Run the fraud detection engine over an uploaded file.
///
/// Idempotent per file: an already-stored result is returned as-is instead of
/// recomputing, so repeated analyze calls cannot create duplicate rows.
pub async fn analyze(
    State(state): State<AppState>,
    _user: UserContext,
    Json(req): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalysisResult>> {
    let upload = UploadedFile::find_by_id(&state.pool, &req.file_id)
        .await?
        .ok_or_else(|| AppError::NotFound("File not found. Please upload first.".to_string()))?;

    if let Some(existing) = AnalysisResultRow::find_by_file(&state.pool, &req.file_id).await? {
        tracing::debug!(file_id = %req.file_id, "returning stored analysis result");
        return Ok(Json(existing.analysis()?));
    }

    let dataset = upload.dataset()?;
    let result = FraudDetector::new().detect(&req.file_id, &dataset);

    let result_json = serde_json::to_string(&result)?;
    AnalysisResultRow::create(&state.pool, &req.file_id, &result_json).await?;

    Ok(Json(result))
}
