use std::path::Path;

use crate::error::{EngineError, Result};
use crate::models::{LogRecord, MessageRecord, MessageShape};
use crate::parsers::LogRecords;
use crate::utils::strip_ansi_codes;

/// Read up to `max_messages` user/assistant turns from a session log.
///
/// Records are consumed in file order. Anything that is not a user or
/// assistant turn is skipped, as is any turn whose flattened text is empty
/// (tool calls, tool results, thinking-only turns). The limit counts kept
/// turns, not lines read; reading stops as soon as it is reached.
pub fn extract_messages(
    path: &Path,
    max_messages: usize,
    shape: MessageShape,
) -> Result<Vec<MessageRecord>> {
    let records = LogRecords::open(path)
        .map_err(|source| EngineError::Io { path: path.to_path_buf(), source })?;

    Ok(records.filter_map(|record| to_message(record, shape)).take(max_messages).collect())
}

fn to_message(record: LogRecord, shape: MessageShape) -> Option<MessageRecord> {
    let role = record.role()?;
    let text = record.text();
    let content = match shape {
        MessageShape::Structured => text,
        MessageShape::Display => strip_ansi_codes(text.trim()),
    };
    if content.trim().is_empty() {
        return None;
    }
    Some(MessageRecord { role, timestamp: record.timestamp, content })
}
