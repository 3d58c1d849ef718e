use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::models::{ConversationEntry, UNKNOWN_PROJECT};

/// Top-level shape of a per-project `sessions-index.json`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexFile {
    #[serde(default)]
    entries: Vec<Value>,
    #[serde(default)]
    original_path: Option<String>,
}

/// One entry as written in an index file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexEntry {
    session_id: String,
    #[serde(default)]
    project_path: Option<String>,
    #[serde(default)]
    first_prompt: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    git_branch: Option<String>,
    #[serde(default, deserialize_with = "super::deserializers::deserialize_optional_timestamp")]
    created: Option<String>,
    #[serde(default, deserialize_with = "super::deserializers::deserialize_optional_timestamp")]
    modified: Option<String>,
    #[serde(default)]
    message_count: u64,
}

impl IndexEntry {
    fn into_entry(self, fallback_project: Option<&str>) -> ConversationEntry {
        let project_path = self
            .project_path
            .filter(|p| !p.is_empty())
            .or_else(|| fallback_project.map(str::to_string))
            .unwrap_or_else(|| UNKNOWN_PROJECT.to_string());

        ConversationEntry {
            session_id: self.session_id,
            project_path,
            first_prompt: self.first_prompt.unwrap_or_default(),
            summary: self.summary.filter(|s| !s.trim().is_empty()),
            git_branch: self.git_branch.unwrap_or_default(),
            created: self.created,
            modified: self.modified,
            message_count: self.message_count,
            is_orphan: false,
        }
    }
}

/// Parse one index file into conversation entries.
///
/// Fails only when the file cannot be read or is not a JSON object at all.
/// Individual entries that do not fit the schema (or have an empty
/// `sessionId`) are skipped with a warning.
pub fn parse_index_file(path: &Path) -> Result<Vec<ConversationEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read index file: {}", path.display()))?;
    let index: IndexFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse index file: {}", path.display()))?;

    let fallback_project = index.original_path.as_deref().filter(|p| !p.is_empty());
    let mut entries = Vec::with_capacity(index.entries.len());
    let mut skipped_count = 0;

    for (position, value) in index.entries.into_iter().enumerate() {
        match serde_json::from_value::<IndexEntry>(value) {
            Ok(raw) if !raw.session_id.trim().is_empty() => {
                entries.push(raw.into_entry(fallback_project));
            }
            Ok(_) => {
                warn!("Skipping entry {} in {}: empty sessionId", position, path.display());
                skipped_count += 1;
            }
            Err(e) => {
                warn!("Skipping malformed entry {} in {}: {}", position, path.display(), e);
                skipped_count += 1;
            }
        }
    }

    if skipped_count > 0 {
        warn!("Parsed {}: {} entries ({} skipped)", path.display(), entries.len(), skipped_count);
    }

    Ok(entries)
}
