//! Google Gemini API client for text completion.
//!
//! This module provides an HTTP client for the Gemini `generateContent`
//! endpoint, used to turn an extraction prompt into raw model text.

use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use crate::gateway::{CompletionError, CompletionModel};
use async_trait::async_trait;
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

/// A single conversation turn
#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

/// A text fragment within a turn
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

/// Response body from `generateContent`
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// A generated completion candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Gemini API client
#[derive(Debug)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client from the application config.
    ///
    /// Fails with a config error when no API key is present so that startup
    /// can abort before the server begins accepting requests.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let api_key = config.gemini_api_key().ok_or_else(|| {
            warn!("GEMINI_API_KEY is required but not configured");
            Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
            }
        })?;

        let mut headers = reqwest::header::HeaderMap::new();
        let mut header_value = reqwest::header::HeaderValue::from_str(&api_key).map_err(|e| {
            warn!("Failed to create API key header: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Invalid API key format".to_string(),
                )),
            }
        })?;
        header_value.set_sensitive(true);
        headers.insert("x-goog-api-key", header_value);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.gemini_base_url().to_string(),
            model: config.gemini_model().to_string(),
        })
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl CompletionModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!("Sending generateContent request to model {}", self.model);

        let response = self
            .client
            .post(self.generate_content_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Gemini API request failed: {:?}", e);
                CompletionError::new(format!("Gemini API request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!("Gemini API error ({status}): {error_text}");
            return Err(CompletionError::new(format!(
                "Gemini API returned {status}: {error_text}"
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Gemini response body: {:?}", e);
            CompletionError::new(format!("Invalid response body from Gemini API: {e}"))
        })?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                warn!("Gemini response contained no candidates");
                CompletionError::new("Gemini API returned no candidates")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;

    fn test_config(base_url: &str) -> Config {
        Config::parse_from([
            "test",
            "--gemini-api-key",
            "test-key",
            "--gemini-base-url",
            base_url,
        ])
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = Config::parse_from(["test", "--gemini-base-url", "http://localhost:9"]);
        if config.gemini_api_key().is_some() {
            // Ambient GEMINI_API_KEY in the environment; nothing to assert here.
            return;
        }
        let err = GeminiClient::new(&config).unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Config)
        );
    }

    #[tokio::test]
    async fn test_complete_returns_first_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "candidates": [
                        {"content": {"parts": [{"text": "{\"summary\":\"S\"}"}]}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = GeminiClient::new(&test_config(&server.url())).unwrap();
        let text = client.complete("prompt").await.unwrap();

        assert_eq!(text, "{\"summary\":\"S\"}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_propagates_provider_error_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .with_status(429)
            .with_body("Resource has been exhausted: check quota.")
            .create_async()
            .await;

        let client = GeminiClient::new(&test_config(&server.url())).unwrap();
        let err = client.complete("prompt").await.unwrap_err();

        // The provider's own wording must survive so extraction can classify it.
        assert!(err.message().contains("quota"));
        assert!(err.message().contains("429"));
    }

    #[tokio::test]
    async fn test_complete_rejects_empty_candidate_list() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"candidates": []}).to_string())
            .create_async()
            .await;

        let client = GeminiClient::new(&test_config(&server.url())).unwrap();
        let err = client.complete("prompt").await.unwrap_err();

        assert!(err.message().contains("no candidates"));
    }
}
