//! Sanitization and validation of completion responses.
//!
//! The completion provider is instructed to return bare JSON but will
//! sometimes wrap it in a markdown fence anyway. This module is the single
//! gate between that untrusted text and a typed [`MeetingMinutes`] value:
//! strip the fence, decode, and reject anything that does not exactly match
//! the expected shape. Values are never coerced.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, MalformedKind};
use crate::minutes::MeetingMinutes;
use log::warn;
use serde_json::Value;

/// Strips one wrapping markdown code fence (optionally tagged `json`) and
/// surrounding whitespace from a raw completion response.
///
/// Text without a fence is returned trimmed, otherwise unchanged. Purely
/// textual; never fails. Idempotent.
pub fn sanitize_response(text: &str) -> &str {
    let mut cleaned = text.trim();

    if let Some(rest) = cleaned
        .strip_prefix("```json")
        .or_else(|| cleaned.strip_prefix("```"))
    {
        cleaned = rest;
        if let Some(rest) = cleaned.trim_end().strip_suffix("```") {
            cleaned = rest;
        }
    }

    cleaned.trim()
}

/// Returns true iff the decoded value matches the minutes schema exactly:
/// a `summary` string with non-whitespace content, `decisions` as an array
/// of strings, and `actionItems` as an array of objects with a string
/// `task` and absent-or-string `owner`/`due`.
///
/// All-or-nothing per field and per array element; wrong types are rejected,
/// never coerced.
pub fn is_valid_minutes(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };

    let has_summary = object
        .get("summary")
        .and_then(Value::as_str)
        .map_or(false, |summary| !summary.trim().is_empty());
    let has_decisions = object
        .get("decisions")
        .and_then(Value::as_array)
        .map_or(false, |decisions| decisions.iter().all(Value::is_string));
    let has_action_items = object
        .get("actionItems")
        .and_then(Value::as_array)
        .map_or(false, |items| items.iter().all(is_valid_action_item));

    has_summary && has_decisions && has_action_items
}

fn is_valid_action_item(item: &Value) -> bool {
    let Some(object) = item.as_object() else {
        return false;
    };

    object.get("task").map_or(false, Value::is_string)
        && object.get("owner").map_or(true, Value::is_string)
        && object.get("due").map_or(true, Value::is_string)
}

/// Turns a raw completion response into typed minutes: sanitize, decode as
/// JSON, validate the shape, then deserialize.
pub fn parse_minutes(text: &str) -> Result<MeetingMinutes, Error> {
    let cleaned = sanitize_response(text);

    let value: Value = serde_json::from_str(cleaned).map_err(|err| {
        warn!("Completion response is not valid JSON: {err}");
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::External(ExternalErrorKind::Malformed(
                MalformedKind::InvalidJson,
            )),
        }
    })?;

    if !is_valid_minutes(&value) {
        warn!("Completion response JSON does not match the minutes schema");
        return Err(Error {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Malformed(
                MalformedKind::InvalidStructure,
            )),
        });
    }

    serde_json::from_value(value).map_err(|err| {
        warn!("Failed to deserialize validated minutes: {err}");
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::External(ExternalErrorKind::Malformed(
                MalformedKind::InvalidStructure,
            )),
        }
    })
}
