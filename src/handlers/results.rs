//! Result retrieval, cross-file reporting and CSV export

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::engine::AnalysisResult;
use crate::middleware::auth::UserContext;
use crate::models::AnalysisResultRow;
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct ReportsSummary {
    pub total_audits: i64,
    pub critical_issues: i64,
    pub resolved_cases: i64,
    pub total_leakage: f64,
}

/// Fetch a stored analysis result
pub async fn get_results(
    State(state): State<AppState>,
    _user: UserContext,
    Path(file_id): Path<String>,
) -> AppResult<Json<AnalysisResult>> {
    let row = AnalysisResultRow::find_by_file(&state.pool, &file_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Results not found. Please analyze the file first.".to_string())
        })?;

    Ok(Json(row.analysis()?))
}

/// Fold every stored result into one dashboard summary
pub async fn reports_summary(
    State(state): State<AppState>,
    _user: UserContext,
) -> AppResult<Json<ReportsSummary>> {
    let rows = AnalysisResultRow::list_all(&state.pool).await?;

    let mut total_audits = 0i64;
    let mut critical_issues = 0i64;
    let mut total_leakage = 0.0f64;

    for row in rows {
        let result = row.analysis()?;
        total_audits += result.summary.total_records;
        critical_issues += result.summary.flagged_count;
        total_leakage += result.summary.total_leakage_amount;
    }

    Ok(Json(ReportsSummary {
        total_audits,
        critical_issues,
        resolved_cases: total_audits - critical_issues,
        total_leakage,
    }))
}

/// Export the flagged cases of one file as a CSV attachment
pub async fn export_results(
    State(state): State<AppState>,
    _user: UserContext,
    Path(file_id): Path<String>,
) -> AppResult<Response> {
    let row = AnalysisResultRow::find_by_file(&state.pool, &file_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Results not found. Please analyze the file first.".to_string())
        })?;

    let result = row.analysis()?;
    let csv = cases_to_csv(&result)?;

    let disposition = format!("attachment; filename=subsiguard_report_{}.csv", file_id);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

fn cases_to_csv(result: &AnalysisResult) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["Beneficiary Name", "Scheme", "Amount", "Risk Score", "Fraud Reasons"])
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    for case in &result.cases {
        writer
            .write_record([
                case.beneficiary_name.as_str(),
                case.scheme.as_str(),
                &case.amount.to_string(),
                &case.risk_score.to_string(),
                &case.fraud_reasons.join(", "),
            ])
            .map_err(|e| AppError::InternalError(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::InternalError(e.to_string()))
}
