use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rayon::prelude::*;
use regex::bytes::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::error::{EngineError, Result};
use crate::indexer::LogCatalog;

/// Build the case-insensitive literal matcher for a deep-search topic
pub fn topic_matcher(topic: &str) -> Result<Regex> {
    if topic.trim().is_empty() {
        return Err(EngineError::InvalidArgument("deep search needs a non-empty topic".to_string()));
    }
    RegexBuilder::new(&regex::escape(topic))
        .case_insensitive(true)
        .build()
        .map_err(|e| EngineError::InvalidArgument(format!("unusable search topic: {}", e)))
}

/// Scan the raw bytes of every session log for `topic`.
///
/// Every record type is searched, not only user and assistant turns, and the
/// whole file is read. Returns the ids of sessions whose log contains the
/// topic anywhere. Unreadable logs are logged and treated as non-matching.
pub fn deep_search(catalog: &LogCatalog, topic: &str) -> Result<HashSet<String>> {
    let matcher = topic_matcher(topic)?;
    let sessions: Vec<(&str, &Path)> = catalog.sessions().collect();

    let matched: HashSet<String> = sessions
        .par_iter()
        .filter(|(_, path)| file_contains(path, &matcher))
        .map(|(session_id, _)| session_id.to_string())
        .collect();

    debug!("Deep search for '{}' matched {} of {} logs", topic, matched.len(), sessions.len());
    Ok(matched)
}

/// True if any line of the file matches. Stops at the first hit.
pub fn file_contains(path: &Path, matcher: &Regex) -> bool {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("Skipping unreadable log {}: {}", path.display(), e);
            return false;
        }
    };

    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return false,
            Ok(_) => {
                if matcher.is_match(&buf) {
                    return true;
                }
            }
            Err(e) => {
                warn!("Stopped scanning {}: {}", path.display(), e);
                return false;
            }
        }
    }
}
