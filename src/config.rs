//! Engine configuration
//!
//! Every tunable of the reconciliation pipeline lives here and is passed in
//! explicitly; the engine reads no environment variables of its own.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::utils::get_claude_dir;

/// Name of the per-project index file
pub const DEFAULT_INDEX_FILE_NAME: &str = "sessions-index.json";

/// Records read from the head of an unindexed log when synthesizing its entry
pub const DEFAULT_PREFIX_RECORDS: usize = 50;

/// Characters of the first user prompt kept in a synthesized entry
pub const DEFAULT_FIRST_PROMPT_CHARS: usize = 120;

/// Identifiers listed in an ambiguous-prefix error
pub const DEFAULT_MAX_AMBIGUOUS_CANDIDATES: usize = 20;

/// Messages returned by `show` when no limit is given
pub const DEFAULT_MAX_MESSAGES: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Root holding one subdirectory per project (`~/.claude/projects`)
    pub projects_dir: PathBuf,
    pub index_file_name: String,
    pub prefix_records: usize,
    pub first_prompt_chars: usize,
    pub max_ambiguous_candidates: usize,
    pub default_max_messages: usize,
}

impl EngineConfig {
    /// Configuration rooted at a projects directory, with default limits
    pub fn new(projects_dir: impl Into<PathBuf>) -> Self {
        Self {
            projects_dir: projects_dir.into(),
            index_file_name: DEFAULT_INDEX_FILE_NAME.to_string(),
            prefix_records: DEFAULT_PREFIX_RECORDS,
            first_prompt_chars: DEFAULT_FIRST_PROMPT_CHARS,
            max_ambiguous_candidates: DEFAULT_MAX_AMBIGUOUS_CANDIDATES,
            default_max_messages: DEFAULT_MAX_MESSAGES,
        }
    }

    /// Configuration for a Claude data directory (logs live under `projects/`)
    pub fn for_claude_dir(claude_dir: &Path) -> Self {
        Self::new(claude_dir.join("projects"))
    }

    /// Configuration for the Claude data directory of the current user
    pub fn from_env() -> Result<Self> {
        Ok(Self::for_claude_dir(&get_claude_dir()?))
    }
}
