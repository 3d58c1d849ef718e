use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::parsers::deserializers::parse_timestamp;

/// Project path used when neither the index nor the log names one
pub const UNKNOWN_PROJECT: &str = "unknown";

/// Metadata for one conversation, either read from an index file or
/// synthesized from an unindexed log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationEntry {
    pub session_id: String,
    pub project_path: String,
    pub first_prompt: String,
    /// `None` when no summary exists (always `None` for synthesized entries)
    pub summary: Option<String>,
    pub git_branch: String,
    pub created: Option<String>,
    pub modified: Option<String>,
    /// Exact for indexed entries, a record count for synthesized ones
    pub message_count: u64,
    pub is_orphan: bool,
}

impl ConversationEntry {
    /// Timestamp used for recency ordering: `modified`, falling back to `created`
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.modified
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| self.created.as_deref().and_then(parse_timestamp))
    }

    /// Timestamp tested by date bounds: `created`, falling back to `modified`
    pub fn filter_time(&self) -> Option<DateTime<Utc>> {
        self.created
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| self.modified.as_deref().and_then(parse_timestamp))
    }
}
