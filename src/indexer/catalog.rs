use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::utils::session_id_from_path;

const LOG_EXTENSION: &str = "jsonl";

/// Sidechain transcripts share their parent's session id and are not sessions
const SIDECHAIN_PREFIX: &str = "agent-";

/// Every project directory and session log under the projects root.
///
/// Built from a single directory walk and reused for the rest of an
/// invocation, so synthesis, deep search and prefix resolution never walk
/// the tree twice.
#[derive(Debug, Clone, Default)]
pub struct LogCatalog {
    project_dirs: Vec<PathBuf>,
    sessions: BTreeMap<String, PathBuf>,
}

impl LogCatalog {
    /// Walk `projects_dir` (one level of project directories, each holding
    /// `<session-id>.jsonl` files).
    ///
    /// Unreadable entries and symlinks are skipped. If two projects hold a log
    /// with the same session id, the first in sorted path order is kept.
    pub fn discover(projects_dir: &Path) -> Self {
        let mut catalog = Self::default();

        let walker =
            WalkDir::new(projects_dir).min_depth(1).max_depth(2).sort_by_file_name().into_iter();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", projects_dir.display(), e);
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_symlink() {
                debug!("Skipping symlink {}", entry.path().display());
                continue;
            }

            if entry.depth() == 1 {
                if file_type.is_dir() {
                    catalog.project_dirs.push(entry.into_path());
                }
                continue;
            }

            if file_type.is_file() && is_session_log(entry.path()) {
                catalog.insert(entry.into_path());
            }
        }

        debug!(
            "Discovered {} session logs in {} project directories",
            catalog.sessions.len(),
            catalog.project_dirs.len()
        );

        catalog
    }

    fn insert(&mut self, path: PathBuf) {
        let Some(session_id) = session_id_from_path(&path) else {
            return;
        };
        match self.sessions.entry(session_id) {
            Entry::Vacant(slot) => {
                slot.insert(path);
            }
            Entry::Occupied(existing) => {
                warn!(
                    "Duplicate session log {} ignored; using {}",
                    path.display(),
                    existing.get().display()
                );
            }
        }
    }

    /// Project directories in sorted order
    pub fn project_dirs(&self) -> &[PathBuf] {
        &self.project_dirs
    }

    /// `(session id, log path)` pairs in session id order
    pub fn sessions(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.sessions.iter().map(|(id, path)| (id.as_str(), path.as_path()))
    }

    pub fn path_for(&self, session_id: &str) -> Option<&Path> {
        self.sessions.get(session_id).map(PathBuf::as_path)
    }

    /// Session ids starting with `prefix`, in sorted order
    pub fn ids_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.sessions
            .range::<str, _>((std::ops::Bound::Included(prefix), std::ops::Bound::Unbounded))
            .map(|(id, _)| id.as_str())
            .take_while(move |id| id.starts_with(prefix))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// `*.jsonl` files other than `agent-*` sidechain transcripts. Sidechains are
/// invisible to every query, deep search included, so text that only appears
/// in a subagent transcript is never found.
fn is_session_log(path: &Path) -> bool {
    let has_log_extension = path.extension().is_some_and(|ext| ext == LOG_EXTENSION);
    let is_sidechain = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with(SIDECHAIN_PREFIX));
    has_log_extension && !is_sidechain
}
