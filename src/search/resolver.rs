use std::path::PathBuf;

use crate::error::{EngineError, Result};
use crate::indexer::LogCatalog;

const LOG_SUFFIX: &str = ".jsonl";

/// Resolve a full session id or a unique prefix of one to its log file.
///
/// An exact id match always wins, even when it is also a prefix of other ids.
/// Otherwise exactly one id must start with `candidate`. On ambiguity at most
/// `max_candidates` ids are listed; `total` carries the real count.
pub fn resolve_session(
    catalog: &LogCatalog,
    candidate: &str,
    max_candidates: usize,
) -> Result<PathBuf> {
    let trimmed = candidate.trim();
    let candidate = trimmed.strip_suffix(LOG_SUFFIX).unwrap_or(trimmed);
    if candidate.is_empty() {
        return Err(EngineError::InvalidArgument("session id must not be empty".to_string()));
    }

    if let Some(path) = catalog.path_for(candidate) {
        return Ok(path.to_path_buf());
    }

    let matches: Vec<&str> = catalog.ids_with_prefix(candidate).collect();
    match matches.as_slice() {
        [] => Err(EngineError::NotFound { candidate: candidate.to_string() }),
        [only] => catalog
            .path_for(only)
            .map(|path| path.to_path_buf())
            .ok_or_else(|| EngineError::NotFound { candidate: candidate.to_string() }),
        _ => Err(EngineError::Ambiguous {
            candidate: candidate.to_string(),
            total: matches.len(),
            matches: matches.iter().take(max_candidates).map(|id| id.to_string()).collect(),
        }),
    }
}
