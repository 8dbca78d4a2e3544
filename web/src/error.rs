use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::controller::ApiResponse;
use domain::error::{DomainErrorKind, Error as DomainError, ExternalErrorKind, MalformedKind};
use log::error;

pub type Result<T> = core::result::Result<T, Error>;

/// Client-facing messages for caller errors. The wording is part of the API
/// contract and is matched by clients, so change with care.
pub(crate) const NO_INPUT_MESSAGE: &str =
    "No meeting notes provided. Send either a .txt file or \"text\" in request body.";
pub(crate) const EMPTY_INPUT_MESSAGE: &str = "Meeting notes cannot be empty.";

#[derive(Debug)]
pub enum Error {
    /// Neither an uploaded file nor a body text field was supplied.
    NoInputProvided,
    /// The selected input was empty or all-whitespace.
    EmptyInput,
    /// A failure surfaced from the domain layer.
    Domain(DomainError),
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl From<DomainError> for Error {
    fn from(err: DomainError) -> Self {
        Error::Domain(err)
    }
}

// Maps each error kind to an HTTP status code and a safe user-facing message.
// The original error (provider text, parse errors) is logged server-side and
// never forwarded to the client.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, message) = match &self {
            Error::NoInputProvided => (StatusCode::BAD_REQUEST, NO_INPUT_MESSAGE),
            Error::EmptyInput => (StatusCode::BAD_REQUEST, EMPTY_INPUT_MESSAGE),
            Error::Domain(err) => {
                error!("Error occurred: {err}");
                match &err.error_kind {
                    DomainErrorKind::External(ExternalErrorKind::Timeout) => (
                        StatusCode::GATEWAY_TIMEOUT,
                        "AI service timeout. Please try again.",
                    ),
                    DomainErrorKind::External(ExternalErrorKind::Quota) => (
                        StatusCode::TOO_MANY_REQUESTS,
                        "API quota exceeded. Please try again later.",
                    ),
                    DomainErrorKind::External(ExternalErrorKind::Malformed(
                        MalformedKind::InvalidJson,
                    )) => (
                        StatusCode::BAD_GATEWAY,
                        "AI returned invalid JSON format. Please try again.",
                    ),
                    DomainErrorKind::External(ExternalErrorKind::Malformed(
                        MalformedKind::InvalidStructure,
                    )) => (StatusCode::BAD_GATEWAY, "Failed to parse AI response."),
                    DomainErrorKind::External(ExternalErrorKind::Other(_)) => (
                        StatusCode::BAD_GATEWAY,
                        "Failed to process meeting notes with AI service.",
                    ),
                    DomainErrorKind::Internal(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                    }
                }
            }
        };

        (status_code, Json(ApiResponse::error(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn response_parts(error: Error) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_caller_errors_map_to_bad_request() {
        let (status, body) = response_parts(Error::EmptyInput).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], serde_json::json!(false));
        assert_eq!(body["error"], serde_json::json!(EMPTY_INPUT_MESSAGE));
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_quota_error_maps_to_too_many_requests() {
        let error = Error::Domain(DomainError {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Quota),
        });
        let (status, body) = response_parts(error).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            body["error"],
            serde_json::json!("API quota exceeded. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_internal_error_does_not_leak_detail() {
        let error = Error::Domain(DomainError {
            source: None,
            error_kind: DomainErrorKind::Internal(domain::error::InternalErrorKind::Other(
                "secret detail".to_string(),
            )),
        });
        let (status, body) = response_parts(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], serde_json::json!("Internal server error"));
    }
}
