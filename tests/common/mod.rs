//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

pub const INDEX_FILE: &str = "sessions-index.json";

/// Builder for creating test .claude directory structures
pub struct ClaudeDirBuilder {
    temp_dir: TempDir,
}

impl ClaudeDirBuilder {
    /// Create a new builder with an empty .claude/projects directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("projects")).expect("Failed to create projects dir");
        Self { temp_dir }
    }

    /// Get the path to the .claude directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.temp_dir.path().join("projects")
    }

    fn project_dir(&self, name: &str) -> PathBuf {
        let dir = self.projects_dir().join(name);
        fs::create_dir_all(&dir).expect("Failed to create project dir");
        dir
    }

    /// Add a project directory holding the given session logs
    pub fn with_project(self, name: &str, logs: &[SessionLogBuilder]) -> Self {
        let dir = self.project_dir(name);
        for log in logs {
            log.create_in(&dir);
        }
        self
    }

    /// Write the project's index file (creating the project if needed)
    pub fn with_index(self, name: &str, index: &IndexBuilder) -> Self {
        let dir = self.project_dir(name);
        fs::write(dir.join(INDEX_FILE), index.to_json()).expect("Failed to write index file");
        self
    }

    /// Write an arbitrary file inside a project directory
    pub fn with_raw_file(self, name: &str, file_name: &str, content: &str) -> Self {
        let dir = self.project_dir(name);
        fs::write(dir.join(file_name), content).expect("Failed to write raw file");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ClaudeDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one `<session-id>.jsonl` log file
pub struct SessionLogBuilder {
    session_id: String,
    lines: Vec<String>,
}

impl SessionLogBuilder {
    pub fn new(session_id: &str) -> Self {
        Self { session_id: session_id.to_string(), lines: Vec::new() }
    }

    pub fn with_record(mut self, record: RecordBuilder) -> Self {
        self.lines.push(record.to_json());
        self
    }

    /// Add a line verbatim (malformed JSON, unknown record types, ...)
    pub fn with_raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn file_name(&self) -> String {
        format!("{}.jsonl", self.session_id)
    }

    /// Create the file in the given directory
    pub fn create_in(&self, dir: &Path) {
        let mut content = self.lines.join("\n");
        content.push('\n');
        fs::write(dir.join(self.file_name()), content).expect("Failed to write session log");
    }
}

/// Builder for one record (line) of a session log
pub struct RecordBuilder {
    record_type: String,
    content: Value,
    timestamp: Option<String>,
    cwd: Option<String>,
    git_branch: Option<String>,
}

impl RecordBuilder {
    fn with_type(record_type: &str, text: &str) -> Self {
        Self {
            record_type: record_type.to_string(),
            content: json!([{ "type": "text", "text": text }]),
            timestamp: None,
            cwd: None,
            git_branch: None,
        }
    }

    /// Create a new user message
    pub fn user(text: &str) -> Self {
        Self::with_type("user", text)
    }

    /// Create a new assistant message
    pub fn assistant(text: &str) -> Self {
        Self::with_type("assistant", text)
    }

    /// An assistant turn holding only a tool call
    pub fn tool_call(command: &str) -> Self {
        Self::assistant("").content_blocks(json!([{
            "type": "tool_use",
            "id": "toolu_1",
            "name": "Bash",
            "input": { "command": command }
        }]))
    }

    /// A user turn holding only a tool result
    pub fn tool_result(output: &str) -> Self {
        Self::user("").content_blocks(json!([{
            "type": "tool_result",
            "tool_use_id": "toolu_1",
            "content": output
        }]))
    }

    /// Replace the content with raw blocks (or a plain string)
    pub fn content_blocks(mut self, content: Value) -> Self {
        self.content = content;
        self
    }

    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = Some(timestamp.to_string());
        self
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self.cwd = Some(cwd.to_string());
        self
    }

    pub fn git_branch(mut self, branch: &str) -> Self {
        self.git_branch = Some(branch.to_string());
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        let mut record = json!({
            "type": self.record_type,
            "message": { "role": self.record_type, "content": self.content },
        });
        if let Some(ts) = &self.timestamp {
            record["timestamp"] = json!(ts);
        }
        if let Some(cwd) = &self.cwd {
            record["cwd"] = json!(cwd);
        }
        if let Some(branch) = &self.git_branch {
            record["gitBranch"] = json!(branch);
        }
        record.to_string()
    }
}

/// Builder for a `sessions-index.json` file
#[derive(Default)]
pub struct IndexBuilder {
    original_path: Option<String>,
    entries: Vec<Value>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn original_path(mut self, path: &str) -> Self {
        self.original_path = Some(path.to_string());
        self
    }

    pub fn with_entry(mut self, entry: IndexEntryBuilder) -> Self {
        self.entries.push(entry.to_value());
        self
    }

    /// Add an entry verbatim
    pub fn with_raw_entry(mut self, entry: Value) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn to_json(&self) -> String {
        let mut index = json!({ "version": 1, "entries": self.entries });
        if let Some(path) = &self.original_path {
            index["originalPath"] = json!(path);
        }
        index.to_string()
    }
}

/// Builder for one entry of an index file
pub struct IndexEntryBuilder {
    value: Value,
}

impl IndexEntryBuilder {
    pub fn new(session_id: &str) -> Self {
        Self {
            value: json!({
                "sessionId": session_id,
                "firstPrompt": "Indexed prompt",
                "messageCount": 2,
                "isSidechain": false,
            }),
        }
    }

    fn set(mut self, key: &str, value: Value) -> Self {
        self.value[key] = value;
        self
    }

    pub fn project_path(self, path: &str) -> Self {
        self.set("projectPath", json!(path))
    }

    pub fn first_prompt(self, prompt: &str) -> Self {
        self.set("firstPrompt", json!(prompt))
    }

    pub fn summary(self, summary: &str) -> Self {
        self.set("summary", json!(summary))
    }

    pub fn git_branch(self, branch: &str) -> Self {
        self.set("gitBranch", json!(branch))
    }

    pub fn created(self, created: &str) -> Self {
        self.set("created", json!(created))
    }

    pub fn modified(self, modified: &str) -> Self {
        self.set("modified", json!(modified))
    }

    pub fn message_count(self, count: u64) -> Self {
        self.set("messageCount", json!(count))
    }

    pub fn to_value(&self) -> Value {
        self.value.clone()
    }
}

pub const SESSION_API_DEPLOY: &str = "aaaa1111-0000-4000-8000-000000000001";
pub const SESSION_API_DOCS: &str = "aaaa2222-0000-4000-8000-000000000002";
pub const SESSION_API_ORPHAN: &str = "bbbb1111-0000-4000-8000-000000000003";
pub const SESSION_WEB_ORPHAN: &str = "cccc1111-0000-4000-8000-000000000004";

/// Helper to create a realistic .claude directory with sample data
///
/// - `-srv-api`: index listing two sessions (both logs present) plus one
///   unindexed log
/// - `-home-me-web`: no index, one unindexed log whose tool output mentions
///   `ECONNREFUSED`, and a sidechain transcript
pub fn realistic_claude_dir() -> TempDir {
    ClaudeDirBuilder::new()
        .with_index(
            "-srv-api",
            &IndexBuilder::new()
                .original_path("/srv/api")
                .with_entry(
                    IndexEntryBuilder::new(SESSION_API_DEPLOY)
                        .first_prompt("Deploy the API to staging")
                        .summary("Staging deployment")
                        .git_branch("main")
                        .created("2025-06-02T09:00:00.000Z")
                        .modified("2025-06-02T10:00:00.000Z")
                        .message_count(12),
                )
                .with_entry(
                    IndexEntryBuilder::new(SESSION_API_DOCS)
                        .project_path("/srv/api")
                        .first_prompt("Write the README")
                        .git_branch("docs/readme")
                        .created("2025-05-20T09:00:00.000Z")
                        .modified("2025-05-20T09:30:00.000Z"),
                ),
        )
        .with_project(
            "-srv-api",
            &[
                SessionLogBuilder::new(SESSION_API_DEPLOY)
                    .with_record(
                        RecordBuilder::user("Deploy the API to staging")
                            .timestamp("2025-06-02T09:00:00.000Z")
                            .cwd("/srv/api")
                            .git_branch("main"),
                    )
                    .with_record(RecordBuilder::assistant("Deploying now").timestamp("2025-06-02T09:00:05.000Z")),
                SessionLogBuilder::new(SESSION_API_DOCS).with_record(
                    RecordBuilder::user("Write the README").timestamp("2025-05-20T09:00:00.000Z"),
                ),
                SessionLogBuilder::new(SESSION_API_ORPHAN)
                    .with_raw_line(r#"{"type":"summary","summary":"Unindexed work"}"#)
                    .with_record(
                        RecordBuilder::user("Fix the flaky deploy test")
                            .timestamp("2025-06-03T08:00:00.000Z")
                            .cwd("/srv/api")
                            .git_branch("fix/flaky"),
                    )
                    .with_record(RecordBuilder::assistant("Looking at it").timestamp("2025-06-03T08:00:02.000Z")),
            ],
        )
        .with_project(
            "-home-me-web",
            &[SessionLogBuilder::new(SESSION_WEB_ORPHAN)
                .with_record(
                    RecordBuilder::user("Why does the dev server fail?")
                        .timestamp("2025-06-04T12:00:00.000Z")
                        .cwd("/home/me/web")
                        .git_branch("main"),
                )
                .with_record(RecordBuilder::tool_call("npm run dev"))
                .with_record(RecordBuilder::tool_result("Error: connect ECONNREFUSED 127.0.0.1:5432"))
                .with_record(RecordBuilder::assistant("The database is not running"))],
        )
        .with_raw_file(
            "-home-me-web",
            "agent-1234abcd.jsonl",
            "{\"type\":\"user\",\"message\":{\"content\":\"sidechain ECONNREFUSED\"}}\n",
        )
        .build()
}
