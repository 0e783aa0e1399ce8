//! Synthetic data handler

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::engine::Record;
use crate::middleware::auth::UserContext;
use crate::synthetic;
use crate::{AppResult, AppState};

const DEFAULT_COUNT: usize = 100;
const MAX_COUNT: usize = 10_000;

#[derive(Debug, Deserialize)]
pub struct SyntheticQuery {
    pub rows: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SyntheticDataResponse {
    pub count: usize,
    pub data: Vec<Record>,
}

/// Generate demo beneficiary data with injected fraud patterns
pub async fn generate(
    State(_state): State<AppState>,
    _user: UserContext,
    Query(query): Query<SyntheticQuery>,
) -> AppResult<Json<SyntheticDataResponse>> {
    let count = query.rows.unwrap_or(DEFAULT_COUNT).min(MAX_COUNT);
    let data = synthetic::generate(count);

    Ok(Json(SyntheticDataResponse {
        count: data.len(),
        data,
    }))
}
