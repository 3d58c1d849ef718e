//! Error types surfaced by the query engine.
//!
//! Only failures the caller can act on are represented here. Record-level and
//! file-level problems (a malformed line, an unreadable index file) are logged
//! and the affected unit is dropped from the output instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// No log file matches the given identifier or prefix.
    #[error("No session found matching '{candidate}'")]
    NotFound { candidate: String },

    /// More than one log file matches the given prefix.
    ///
    /// `matches` is capped; `total` is the real number of matching sessions.
    #[error("Ambiguous session id '{candidate}': {total} sessions match ({})", .matches.join(", "))]
    Ambiguous { candidate: String, matches: Vec<String>, total: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The log-file root itself does not exist.
    #[error("Log directory not found: {}", .path.display())]
    MissingSource { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
