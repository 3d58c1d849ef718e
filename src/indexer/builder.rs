//! Reconciliation of index files with unindexed session logs.
//!
//! # Error Handling Strategy
//!
//! Building the merged view never fails as a whole:
//!
//! - **Index-level errors**: A missing or unparseable index file is logged and contributes
//!   no entries; the logs it would have covered are then synthesized instead.
//! - **Log-level errors**: A log file that cannot be read is logged and left out.
//! - **Summary**: Counts of indexed, synthesized and failed sessions are logged at the end.

use rayon::prelude::*;
use tracing::{debug, warn};

use super::catalog::LogCatalog;
use super::loader::load_indexes;
use super::merger::merge_entries;
use super::synthesizer::synthesize_entry;
use crate::config::EngineConfig;
use crate::models::ConversationEntry;

/// Build the canonical list of all known conversations
///
/// Index entries come first; every log file whose session id no index lists
/// gets a synthesized entry. The result is sorted newest first and holds one
/// entry per session id.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use ai_history_search::EngineConfig;
/// use ai_history_search::indexer::{LogCatalog, build_index};
///
/// let config = EngineConfig::for_claude_dir(Path::new("/Users/alice/.claude"));
/// let catalog = LogCatalog::discover(&config.projects_dir);
/// let entries = build_index(&config, &catalog);
/// println!("{} conversations", entries.len());
/// ```
pub fn build_index(config: &EngineConfig, catalog: &LogCatalog) -> Vec<ConversationEntry> {
    let loaded = load_indexes(catalog.project_dirs(), &config.index_file_name);

    let uncovered: Vec<(&str, &std::path::Path)> =
        catalog.sessions().filter(|(id, _)| !loaded.covered.contains(*id)).collect();

    let results: Vec<Option<ConversationEntry>> = uncovered
        .par_iter()
        .map(|(session_id, path)| match synthesize_entry(path, session_id, config) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Failed to read session log {}: {:#}", path.display(), e);
                None
            }
        })
        .collect();

    let failed = results.iter().filter(|r| r.is_none()).count();
    let synthesized: Vec<ConversationEntry> = results.into_iter().flatten().collect();
    let indexed_count = loaded.entries.len();
    let synthesized_count = synthesized.len();

    let merged = merge_entries(loaded.entries, synthesized);

    debug!(
        "Reconciled {} conversations ({} index entries, {} synthesized, {} unreadable logs)",
        merged.len(),
        indexed_count,
        synthesized_count,
        failed
    );

    merged
}
