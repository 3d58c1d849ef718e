use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::LogRecord;

const CONTENT_TYPE_TEXT: &str = "text";

/// Parse a single log line into a [`LogRecord`]
pub fn parse_record(line: &str) -> serde_json::Result<LogRecord> {
    serde_json::from_str(line)
}

/// Flatten a `message.content` value into plain text.
///
/// A string is returned as-is. For a list of content blocks only `text`
/// blocks are kept, joined with newlines; thinking, tool_use, tool_result,
/// image and any other block types are dropped.
pub fn flatten_content(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Array(blocks) => {
            let text_parts: Vec<&str> = blocks
                .iter()
                .filter(|block| {
                    block.get("type").and_then(Value::as_str) == Some(CONTENT_TYPE_TEXT)
                })
                .filter_map(|block| block.get("text").and_then(Value::as_str))
                .collect();
            text_parts.join("\n")
        }
        _ => String::new(),
    }
}

/// Minimal view of a record used when only its role matters
#[derive(Deserialize)]
struct RecordType {
    #[serde(rename = "type", default)]
    record_type: Option<String>,
}

/// Read just the `type` field of a log line.
///
/// Cheaper than [`parse_record`] for lines whose content is never needed.
pub fn parse_record_type(line: &str) -> serde_json::Result<Option<String>> {
    serde_json::from_str::<RecordType>(line).map(|r| r.record_type)
}

/// Streams the non-blank lines of a session log.
///
/// Lines are decoded lossily so invalid UTF-8 never aborts a scan. A read
/// error ends the stream after a warning.
pub struct LogLines {
    reader: BufReader<File>,
    path: PathBuf,
    line_num: usize,
    buf: Vec<u8>,
}

impl LogLines {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self { reader: BufReader::new(file), path: path.to_path_buf(), line_num: 0, buf: Vec::new() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for LogLines {
    /// (1-based line number, line text)
    type Item = (usize, String);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_num += 1;
                    let line = String::from_utf8_lossy(&self.buf);
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    return Some((self.line_num, line.to_string()));
                }
                Err(e) => {
                    warn!(
                        "Stopped reading {} after line {}: {}",
                        self.path.display(),
                        self.line_num,
                        e
                    );
                    return None;
                }
            }
        }
    }
}

/// Streams parsed records from a session log, skipping malformed lines
pub struct LogRecords {
    lines: LogLines,
}

impl LogRecords {
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self { lines: LogLines::open(path)? })
    }
}

impl Iterator for LogRecords {
    type Item = LogRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (line_num, line) = self.lines.next()?;
            match parse_record(&line) {
                Ok(record) => return Some(record),
                Err(e) => {
                    debug!(
                        "Skipping malformed record at line {} in {}: {}",
                        line_num,
                        self.lines.path().display(),
                        e
                    );
                }
            }
        }
    }
}
