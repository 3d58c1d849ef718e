use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::config::EngineConfig;
use crate::models::{ConversationEntry, Role, UNKNOWN_PROJECT};
use crate::parsers::{LogLines, parse_record, parse_record_type};
use crate::utils::truncate_chars;

/// Build a metadata entry for a log file no index knows about.
///
/// Only the first `config.prefix_records` records are parsed in full; project
/// path, branch, first prompt and creation time are all set at the start of a
/// session. The rest of the file is read with a type-only parse to count
/// user/assistant records. `modified` comes from the file's mtime.
pub fn synthesize_entry(
    path: &Path,
    session_id: &str,
    config: &EngineConfig,
) -> Result<ConversationEntry> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
    let modified = metadata
        .modified()
        .ok()
        .map(|mtime| DateTime::<Utc>::from(mtime).to_rfc3339_opts(SecondsFormat::Millis, true));

    let lines = LogLines::open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let mut parsed_records = 0;
    let mut message_count = 0u64;
    let mut project_path: Option<String> = None;
    let mut git_branch: Option<String> = None;
    let mut first_prompt: Option<String> = None;
    let mut created: Option<String> = None;

    for (line_num, line) in lines {
        if parsed_records >= config.prefix_records {
            if is_role_record(&line, line_num, path) {
                message_count += 1;
            }
            continue;
        }

        // A record whose side fields do not fit still counts by its `type`
        let record = match parse_record(&line) {
            Ok(record) => record,
            Err(_) => {
                if is_role_record(&line, line_num, path) {
                    message_count += 1;
                }
                continue;
            }
        };
        parsed_records += 1;

        let role = record.role();
        if role.is_some() {
            message_count += 1;
        }
        if created.is_none() {
            created = record.timestamp.clone();
        }
        if project_path.is_none() {
            project_path = record.cwd.clone().filter(|cwd| !cwd.is_empty());
        }
        if git_branch.is_none() {
            git_branch = record.git_branch.clone().filter(|branch| !branch.is_empty());
        }
        if first_prompt.is_none() && role == Some(Role::User) {
            let text = record.text();
            let text = text.trim();
            if !text.is_empty() {
                first_prompt = Some(truncate_chars(text, config.first_prompt_chars).to_string());
            }
        }
    }

    Ok(ConversationEntry {
        session_id: session_id.to_string(),
        project_path: project_path.unwrap_or_else(|| UNKNOWN_PROJECT.to_string()),
        first_prompt: first_prompt.unwrap_or_default(),
        summary: None,
        git_branch: git_branch.unwrap_or_default(),
        created,
        modified,
        message_count,
        is_orphan: true,
    })
}

/// True if the line's `type` is user or assistant, whatever its other fields hold
fn is_role_record(line: &str, line_num: usize, path: &Path) -> bool {
    match parse_record_type(line) {
        Ok(record_type) => record_type.as_deref().and_then(Role::from_record_type).is_some(),
        Err(e) => {
            debug!("Skipping malformed record at line {} in {}: {}", line_num, path.display(), e);
            false
        }
    }
}
