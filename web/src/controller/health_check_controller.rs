use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Health check response body. Reports liveness only; the completion
/// provider is not contacted.
#[derive(Debug, Serialize)]
struct HealthStatus {
    success: bool,
    message: &'static str,
    timestamp: String,
}

/// GET /api/health
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthStatus {
            success: true,
            message: "Meeting Minutes Extractor API is running",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }),
    )
}
