//! Error types for the `domain` layer.
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. The intent is to translate errors between layers while maintaining
/// layer boundaries: `web` inspects the `error_kind` tree to pick an HTTP status code
/// and a safe client-facing message, while the original provider error text stays
/// server-side in `source`.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Config,
    Other(String),
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
/// These cover everything that can go wrong while delegating to the completion provider:
/// the call itself failing (timeout, quota/rate limit, anything else) or the call
/// succeeding but returning text that cannot be turned into a typed result.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    /// The completion call reported a timeout.
    Timeout,
    /// The completion call reported quota or rate-limit exhaustion.
    Quota,
    /// The completion call succeeded but the returned text is unusable.
    Malformed(MalformedKind),
    /// Any other completion call failure.
    Other(String),
}

/// Distinguishes the two ways a completion response can be unusable.
#[derive(Debug, PartialEq)]
pub enum MalformedKind {
    /// Not parseable as JSON after sanitization.
    InvalidJson,
    /// Parses as JSON but does not match the minutes schema.
    InvalidStructure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        // Errors that result from issues with the network call itself.
        } else {
            let message = err.to_string();
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(message)),
            }
        }
    }
}
