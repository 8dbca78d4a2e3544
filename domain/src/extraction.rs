//! Meeting minutes extraction orchestration.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use crate::gateway::{CompletionError, CompletionModel};
use crate::minutes::MeetingMinutes;
use crate::{prompt, response};
use log::*;

/// Extracts structured minutes from free-form meeting notes.
///
/// Builds the extraction prompt, runs a single completion call (no retry;
/// a failed call is terminal for the request), then sanitizes and validates
/// the returned text into a typed [`MeetingMinutes`] value.
pub async fn extract_minutes(
    model: &dyn CompletionModel,
    meeting_text: &str,
) -> Result<MeetingMinutes, Error> {
    let prompt = prompt::build_prompt(meeting_text);

    debug!("Requesting minutes extraction from completion model");
    let text = model
        .complete(&prompt)
        .await
        .map_err(classify_completion_error)?;
    debug!("Received completion response");

    response::parse_minutes(&text)
}

/// Classifies a completion failure into the domain error taxonomy by
/// inspecting the provider's message.
///
/// Matching is case-sensitive substring matching on "timeout", "quota" and
/// "limit", mirroring the wording Gemini uses in its error bodies. Anything
/// unrecognized is a generic upstream failure.
fn classify_completion_error(err: CompletionError) -> Error {
    let message = err.message().to_string();
    warn!("Completion model call failed: {message}");

    let error_kind = if message.contains("timeout") {
        DomainErrorKind::External(ExternalErrorKind::Timeout)
    } else if message.contains("quota") || message.contains("limit") {
        DomainErrorKind::External(ExternalErrorKind::Quota)
    } else {
        DomainErrorKind::External(ExternalErrorKind::Other(message))
    };

    Error {
        source: Some(Box::new(err)),
        error_kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedKind;
    use async_trait::async_trait;

    /// Deterministic stand-in for the completion provider.
    struct StubModel {
        reply: Result<String, String>,
    }

    impl StubModel {
        fn replies(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
            }
        }

        fn fails(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
            }
        }
    }

    #[async_trait]
    impl CompletionModel for StubModel {
        async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
            self.reply
                .clone()
                .map_err(CompletionError::new)
        }
    }

    #[tokio::test]
    async fn test_extract_returns_minutes_from_fenced_response() {
        let model = StubModel::replies(
            "```json\n{\"summary\": \"Planning sync.\", \"decisions\": [\"Ship Friday\"], \
             \"actionItems\": [{\"task\": \"Write changelog\", \"owner\": \"Bob\", \"due\": \"Friday\"}]}\n```",
        );

        let minutes = extract_minutes(&model, "notes").await.unwrap();

        assert_eq!(minutes.summary, "Planning sync.");
        assert_eq!(minutes.decisions, vec!["Ship Friday".to_string()]);
        assert_eq!(minutes.action_items.len(), 1);
        assert_eq!(minutes.action_items[0].task, "Write changelog");
        assert_eq!(minutes.action_items[0].owner.as_deref(), Some("Bob"));
        assert_eq!(minutes.action_items[0].due.as_deref(), Some("Friday"));
    }

    #[tokio::test]
    async fn test_extract_classifies_timeout_failure() {
        let model = StubModel::fails("upstream timeout while generating content");
        let err = extract_minutes(&model, "notes").await.unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Timeout)
        );
    }

    #[tokio::test]
    async fn test_extract_classifies_quota_and_limit_failures() {
        let model = StubModel::fails("Resource has been exhausted: check quota.");
        let err = extract_minutes(&model, "notes").await.unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Quota)
        );

        let model = StubModel::fails("rate limit reached for this key");
        let err = extract_minutes(&model, "notes").await.unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Quota)
        );
    }

    #[tokio::test]
    async fn test_classification_is_case_sensitive() {
        // "Timeout" with a capital T does not match; it falls through to Other.
        let model = StubModel::fails("Timeout contacting provider");
        let err = extract_minutes(&model, "notes").await.unwrap_err();
        assert!(matches!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Other(_))
        ));
    }

    #[tokio::test]
    async fn test_extract_classifies_unknown_failure_as_other() {
        let model = StubModel::fails("connection reset by peer");
        let err = extract_minutes(&model, "notes").await.unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Other(
                "connection reset by peer".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_extract_rejects_non_json_response() {
        let model = StubModel::replies("Sure! Here are your meeting minutes:");
        let err = extract_minutes(&model, "notes").await.unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Malformed(MalformedKind::InvalidJson))
        );
    }

    #[tokio::test]
    async fn test_extract_rejects_schema_mismatch() {
        let model = StubModel::replies("{\"summary\": \"S\", \"decisions\": [1], \"actionItems\": []}");
        let err = extract_minutes(&model, "notes").await.unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Malformed(
                MalformedKind::InvalidStructure
            ))
        );
    }
}
