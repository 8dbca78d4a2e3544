use crate::controller::{health_check_controller, meeting_controller, ApiResponse};
use crate::AppState;

use axum::extract::DefaultBodyLimit;
use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

/// Maximum accepted request body size (10 MB), covering both JSON text
/// bodies and uploaded files.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(meeting_routes(app_state))
        .fallback(not_found)
}

fn health_routes() -> Router {
    Router::new().route("/api/health", get(health_check_controller::health_check))
}

fn meeting_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/process-meeting",
            post(meeting_controller::process_meeting),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(app_state)
}

async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(format!(
            "Route {} {} not found",
            method,
            uri.path()
        ))),
    )
}
