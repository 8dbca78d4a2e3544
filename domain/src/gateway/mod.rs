//! Gateways to external collaborators.

use async_trait::async_trait;
use std::fmt;

pub mod gemini;

/// Abstraction over the external text-completion call.
///
/// The provider takes a single prompt string and asynchronously returns the
/// model's raw text or a failure; no structural guarantees are assumed from
/// it. Keeping this behind a trait lets tests substitute a deterministic
/// stub instead of wiring a concrete SDK client into the extraction path.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Run a single completion request. One attempt, no internal retry.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Failure reported by a completion provider, carrying the provider's own
/// message. Extraction classifies these by message content, so providers
/// should preserve upstream error text rather than replace it.
#[derive(Debug)]
pub struct CompletionError {
    message: String,
}

impl CompletionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CompletionError {}
