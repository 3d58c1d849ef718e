//! Reconciled view of all conversations
//!
//! # Pipeline
//!
//! - [`LogCatalog`] walks the projects root once and maps session ids to log files.
//! - [`load_indexes`] reads each project's index file; these entries are authoritative.
//! - [`synthesize_entry`] derives an entry for every log no index covers, reading only the
//!   head of the file for metadata.
//! - [`merge_entries`] unions both, sorts newest first and keeps one entry per session id.
//!
//! Nothing is written back to disk. The view is rebuilt on every invocation from whatever
//! index and log files exist at that moment.

pub mod builder;
pub mod catalog;
pub mod loader;
pub mod merger;
pub mod synthesizer;

pub use builder::build_index;
pub use catalog::LogCatalog;
pub use loader::{LoadedIndexes, load_indexes};
pub use merger::{dedup_by_session, merge_entries, sort_by_recency};
pub use synthesizer::synthesize_entry;
