use std::collections::HashSet;
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::models::ConversationEntry;
use crate::parsers::parse_index_file;

/// Entries read from every project's index file
#[derive(Debug, Default)]
pub struct LoadedIndexes {
    /// All entries in project-directory order, duplicates included
    pub entries: Vec<ConversationEntry>,
    /// Session ids listed by at least one index
    pub covered: HashSet<String>,
}

/// Read the index file of each project directory.
///
/// A missing index contributes nothing, exactly like an empty one. An
/// unreadable or unparseable index is logged and likewise contributes nothing.
pub fn load_indexes(project_dirs: &[PathBuf], index_file_name: &str) -> LoadedIndexes {
    let per_project: Vec<Vec<ConversationEntry>> = project_dirs
        .par_iter()
        .map(|project_dir| {
            let index_path = project_dir.join(index_file_name);
            if !index_path.is_file() {
                debug!("No index file in {}", project_dir.display());
                return Vec::new();
            }
            match parse_index_file(&index_path) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Ignoring index {}: {:#}", index_path.display(), e);
                    Vec::new()
                }
            }
        })
        .collect();

    let entries: Vec<ConversationEntry> = per_project.into_iter().flatten().collect();
    let covered = entries.iter().map(|e| e.session_id.clone()).collect();

    LoadedIndexes { entries, covered }
}
