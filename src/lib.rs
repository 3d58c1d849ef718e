//! AI History Search - Reconcile and query Claude Code conversation logs
//!
//! This library reads the conversation archive Claude Code keeps under
//! `~/.claude/projects/`. Each project directory holds raw session logs
//! (`<sessionId>.jsonl`) and, optionally, a `sessions-index.json` summarizing
//! some of them. It supports:
//!
//! - Merging index metadata with metadata synthesized from unindexed logs
//! - Filtering the merged list by topic, date range, branch and project
//! - Deep search over the full content of every log
//! - Resolving a session from a unique prefix of its id
//! - Extracting the user/assistant turns of one session
//!
//! Nothing is cached on disk; every [`HistoryEngine`] reconciles from the
//! files present when it is first queried.
//!
//! # Example
//!
//! ```no_run
//! use ai_history_search::{EngineConfig, HistoryEngine, SearchCriteria};
//!
//! let engine = HistoryEngine::new(EngineConfig::from_env()?)?;
//! let criteria = SearchCriteria::default().with_topic("deploy").with_branch("main");
//! for entry in engine.search_entries(&criteria, false)? {
//!     println!("{} {}", entry.session_id, entry.first_prompt);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod filters;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod search;
pub mod utils;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::HistoryEngine;
pub use error::{EngineError, Result};
pub use models::{ConversationEntry, MessageRecord, MessageShape, Role, SearchCriteria};
pub use utils::format_path_with_tilde;
