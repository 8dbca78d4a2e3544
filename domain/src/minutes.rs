//! Typed meeting minutes produced by a successful extraction.

use serde::{Deserialize, Serialize};

/// Structured minutes extracted from free-form meeting notes.
///
/// Instances are only ever constructed from a completion response that has
/// passed schema validation; there is no partially-valid state. `decisions`
/// and `action_items` are always present, empty when the meeting had none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingMinutes {
    pub summary: String,
    pub decisions: Vec<String>,
    #[serde(rename = "actionItems")]
    pub action_items: Vec<ActionItem>,
}

/// A single action item from the meeting.
///
/// `owner` and `due` are semantically "unspecified" when absent, never an
/// empty string; they are skipped on serialization so clients see the field
/// only when the model supplied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub task: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
}
