//! Controller for meeting minutes extraction.
//!
//! Accepts meeting notes either as an uploaded `file` multipart field or as
//! `text` in a JSON body, and returns the extracted structured minutes.

use crate::controller::ApiResponse;
use crate::params::meeting::ProcessMeetingParams;
use crate::{AppState, Error};

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use domain::extraction;
use log::*;

/// POST /api/process-meeting
pub async fn process_meeting(
    State(app_state): State<AppState>,
    request: Request,
) -> Result<impl IntoResponse, Error> {
    // 1. Select the input source: an uploaded file wins over body text
    let meeting_text = select_meeting_text(request).await?;

    // 2. Reject empty or whitespace-only notes
    if meeting_text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    // 3. Delegate extraction to the completion provider
    let minutes =
        extraction::extract_minutes(app_state.completion_model.as_ref(), &meeting_text).await?;

    info!("Successfully processed meeting notes");

    Ok((StatusCode::OK, Json(ApiResponse::ok(minutes))))
}

/// Picks the meeting text out of the request.
///
/// A multipart `file` field is decoded as UTF-8 (lossy, matching the
/// tolerant decode the upload path has always had) and preferred; otherwise
/// a non-empty `text` field in a JSON body is used. Anything else is
/// `NoInputProvided`; emptiness of the selected text is checked by the
/// caller.
async fn select_meeting_text(request: Request) -> Result<String, Error> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|_| Error::NoInputProvided)?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| Error::NoInputProvided)?
        {
            if field.name() == Some("file") {
                let bytes = field.bytes().await.map_err(|_| Error::NoInputProvided)?;
                info!("Processing meeting notes from uploaded file");
                return Ok(String::from_utf8_lossy(&bytes).into_owned());
            }
        }

        debug!("Multipart request contained no file field");
        Err(Error::NoInputProvided)
    } else {
        let Json(params) = Json::<ProcessMeetingParams>::from_request(request, &())
            .await
            .map_err(|_| Error::NoInputProvided)?;

        match params.text {
            Some(text) if !text.is_empty() => {
                info!("Processing meeting notes from request body");
                Ok(text)
            }
            _ => Err(Error::NoInputProvided),
        }
    }
}
