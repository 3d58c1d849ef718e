use serde::Deserialize;
use serde_json::Value;

use super::message::Role;
use crate::parsers::record::flatten_content;

/// The `message` object carried by user and assistant records
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMessage {
    /// A plain string or a list of typed content blocks
    #[serde(default)]
    pub content: Value,
}

/// One line of a raw session log.
///
/// Every field is optional so that summary, snapshot and system records
/// parse alongside conversation turns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    #[serde(rename = "type", default)]
    pub record_type: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_optional_timestamp")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub git_branch: Option<String>,
    #[serde(default)]
    pub message: Option<RawMessage>,
}

impl LogRecord {
    pub fn role(&self) -> Option<Role> {
        self.record_type.as_deref().and_then(Role::from_record_type)
    }

    /// Flattened text of `message.content`; empty when there is no message
    pub fn text(&self) -> String {
        self.message.as_ref().map(|m| flatten_content(&m.content)).unwrap_or_default()
    }
}
