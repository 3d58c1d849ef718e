//! Operations that go back to the raw session logs.
//!
//! - [`deep_search`] scans whole log files for a topic.
//! - [`resolve_session`] turns a full or partial session id into a log path.
//! - [`extract_messages`] reads the user/assistant turns of one log.

pub mod deep;
pub mod extractor;
pub mod resolver;

pub use deep::deep_search;
pub use extractor::extract_messages;
pub use resolver::resolve_session;
