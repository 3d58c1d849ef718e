//! Parsers for session logs and per-project index files
//!
//! # Error Handling Strategy
//!
//! Parsing follows a **graceful degradation** approach:
//!
//! - **Individual line failures**: A malformed log line is logged at debug level and
//!   skipped. Scanning continues with the next line; one bad record never hides the rest
//!   of a session.
//!
//! - **Index entries**: An index file that parses as JSON but carries entries with the
//!   wrong shape keeps its good entries. Bad entries are logged and dropped.
//!
//! - **Whole-file failures**: An index file that cannot be read or is not JSON returns an
//!   error; the caller decides whether that is fatal (the loader treats it as an empty
//!   index).
//!
//! - **Error propagation**: File-level errors use `anyhow::Result` with context, since
//!   callers only log them.

pub mod deserializers;
pub mod index_file;
pub mod record;

pub use index_file::parse_index_file;
pub use record::{LogLines, LogRecords, flatten_content, parse_record, parse_record_type};
