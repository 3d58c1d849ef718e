//! Data models for session logs and the entries derived from them.
//!
//! - [`LogRecord`] - One parsed line of a raw session log
//! - [`ConversationEntry`] - Per-session metadata, indexed or synthesized
//! - [`MessageRecord`] - One extracted user/assistant turn
//! - [`SearchCriteria`] - Optional constraints for list and search
//!
//! Timestamps are kept as the strings found on disk and parsed on demand
//! through [`crate::parsers::deserializers::parse_timestamp`].

pub mod criteria;
pub mod entry;
pub mod message;
pub mod record;

pub use criteria::SearchCriteria;
pub use entry::{ConversationEntry, UNKNOWN_PROJECT};
pub use message::{MessageRecord, MessageShape, Role};
pub use record::{LogRecord, RawMessage};
