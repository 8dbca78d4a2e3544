//! Core semantics of the meeting minutes extractor: prompt construction,
//! completion-response sanitization and validation, and the extraction
//! operation that ties them to the external completion provider.

pub mod error;
pub mod extraction;
pub mod gateway;
pub mod minutes;
pub mod prompt;
pub mod response;

pub use minutes::{ActionItem, MeetingMinutes};
