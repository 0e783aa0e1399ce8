//! Liveness probes

use axum::Json;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "subsiguard",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "SubsiGuard Backend is running" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_identifies_service() {
        let Json(resp) = check().await;
        assert_eq!(resp.status, "healthy");
        assert_eq!(resp.service, "subsiguard");
        assert!(!resp.version.is_empty());
    }

    #[tokio::test]
    async fn test_root_message() {
        let Json(body) = root().await;
        assert_eq!(body["message"], "SubsiGuard Backend is running");
    }
}
