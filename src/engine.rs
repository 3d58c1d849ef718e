//! Query engine over the reconciled conversation list
//!
//! [`HistoryEngine`] owns the configuration and two lazily built caches: the
//! [`LogCatalog`] (one directory walk) and the merged entry list (one
//! reconciliation pass). Both live only as long as the engine instance.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::filters::apply_criteria;
use crate::indexer::{LogCatalog, build_index, merge_entries};
use crate::models::{ConversationEntry, MessageRecord, MessageShape, SearchCriteria};
use crate::search;

pub struct HistoryEngine {
    config: EngineConfig,
    catalog: OnceLock<LogCatalog>,
    entries: OnceLock<Vec<ConversationEntry>>,
}

impl HistoryEngine {
    /// Fails with `MissingSource` when the log root is not a directory
    pub fn new(config: EngineConfig) -> Result<Self> {
        if !config.projects_dir.is_dir() {
            return Err(EngineError::MissingSource { path: config.projects_dir.clone() });
        }
        Ok(Self { config, catalog: OnceLock::new(), entries: OnceLock::new() })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn catalog(&self) -> &LogCatalog {
        self.catalog.get_or_init(|| LogCatalog::discover(&self.config.projects_dir))
    }

    /// Every known conversation, newest first, one entry per session id
    pub fn all_entries(&self) -> &[ConversationEntry] {
        self.entries.get_or_init(|| build_index(&self.config, self.catalog()))
    }

    /// All entries, optionally narrowed by `criteria`. An empty criteria set
    /// is allowed here and keeps everything.
    pub fn list_entries(
        &self,
        criteria: Option<&SearchCriteria>,
    ) -> Result<Vec<ConversationEntry>> {
        let entries = self.all_entries().to_vec();
        match criteria {
            Some(criteria) => Ok(truncate(apply_criteria(entries, criteria)?, criteria.limit)),
            None => Ok(entries),
        }
    }

    /// Entries matching `criteria`, which must constrain at least one field.
    ///
    /// With `deep` and a topic, sessions whose raw log contains the topic are
    /// added to the indexed matches, provided they pass the remaining
    /// criteria. The result is therefore always a superset of the non-deep
    /// search for the same criteria.
    pub fn search_entries(
        &self,
        criteria: &SearchCriteria,
        deep: bool,
    ) -> Result<Vec<ConversationEntry>> {
        if criteria.is_empty() {
            return Err(EngineError::InvalidArgument(
                "search needs at least one of: topic, after, before, branch, project".to_string(),
            ));
        }

        let indexed = apply_criteria(self.all_entries().to_vec(), criteria)?;

        let results = match criteria.topic.as_deref() {
            Some(topic) if deep => {
                let hits = search::deep_search(self.catalog(), topic)?;
                let candidates: Vec<ConversationEntry> = self
                    .all_entries()
                    .iter()
                    .filter(|entry| hits.contains(&entry.session_id))
                    .cloned()
                    .collect();
                let content_matches = apply_criteria(candidates, &criteria.without_topic())?;
                debug!(
                    "Deep search added {} content matches to {} indexed matches",
                    content_matches.len(),
                    indexed.len()
                );
                merge_entries(indexed, content_matches)
            }
            None if deep => {
                debug!("Deep search skipped: no topic given");
                indexed
            }
            _ => indexed,
        };

        Ok(truncate(results, criteria.limit))
    }

    /// Log file for a full session id or a unique prefix of one
    pub fn resolve_session(&self, candidate: &str) -> Result<PathBuf> {
        search::resolve_session(self.catalog(), candidate, self.config.max_ambiguous_candidates)
    }

    pub fn extract_messages(
        &self,
        path: &Path,
        max_messages: usize,
        shape: MessageShape,
    ) -> Result<Vec<MessageRecord>> {
        search::extract_messages(path, max_messages, shape)
    }

    /// Merged entry for `session_id`, if an index lists it or a log exists
    pub fn lookup_metadata(&self, session_id: &str) -> Option<ConversationEntry> {
        self.all_entries().iter().find(|entry| entry.session_id == session_id).cloned()
    }
}

fn truncate(mut entries: Vec<ConversationEntry>, limit: Option<usize>) -> Vec<ConversationEntry> {
    if let Some(limit) = limit {
        entries.truncate(limit);
    }
    entries
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn user_line(text: &str, ts: &str) -> String {
        format!(
            r#"{{"type":"user","timestamp":"{ts}","gitBranch":"main","cwd":"/srv/api","message":{{"role":"user","content":"{text}"}}}}"#
        )
    }

    fn setup() -> (TempDir, HistoryEngine) {
        let root = TempDir::new().unwrap();
        let project = root.path().join("-srv-api");
        fs::create_dir_all(&project).unwrap();
        fs::write(
            project.join("sessions-index.json"),
            r#"{"entries":[{"sessionId":"indexed-1","projectPath":"/srv/api","firstPrompt":"deploy the api","summary":"Deploy","gitBranch":"main","created":"2025-06-02T10:00:00Z","modified":"2025-06-02T11:00:00Z","messageCount":4}]}"#,
        )
        .unwrap();
        fs::write(
            project.join("indexed-1.jsonl"),
            format!("{}\n", user_line("deploy the api", "2025-06-02T10:00:00Z")),
        )
        .unwrap();
        fs::write(
            project.join("orphan-1.jsonl"),
            format!(
                "{}\n{}\n",
                user_line("write docs", "2025-06-01T09:00:00Z"),
                r#"{"type":"assistant","message":{"content":[{"type":"tool_use","name":"Bash","input":{"command":"kubectl rollout"}}]}}"#
            ),
        )
        .unwrap();
        let engine = HistoryEngine::new(EngineConfig::new(root.path())).unwrap();
        (root, engine)
    }

    #[test]
    fn test_missing_root_is_missing_source() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("nope");
        match HistoryEngine::new(EngineConfig::new(&missing)) {
            Err(EngineError::MissingSource { path }) => assert_eq!(path, missing),
            _ => panic!("expected MissingSource"),
        }
    }

    #[test]
    fn test_list_without_criteria_returns_everything() {
        let (_root, engine) = setup();
        let entries = engine.list_entries(None).unwrap();
        assert_eq!(entries.len(), 2);
        // synthesized `modified` is the file mtime, so the orphan is newest
        assert_eq!(entries[0].session_id, "orphan-1");
        assert!(entries[0].is_orphan);
        assert_eq!(entries[1].session_id, "indexed-1");
        assert!(!entries[1].is_orphan);
    }

    #[test]
    fn test_list_applies_limit() {
        let (_root, engine) = setup();
        let criteria = SearchCriteria::default().with_limit(1);
        assert_eq!(engine.list_entries(Some(&criteria)).unwrap().len(), 1);
    }

    #[test]
    fn test_search_requires_a_criterion() {
        let (_root, engine) = setup();
        let err = engine.search_entries(&SearchCriteria::default().with_limit(3), false);
        assert!(matches!(err, Err(EngineError::InvalidArgument(_))));
    }

    #[test]
    fn test_deep_search_adds_content_matches() {
        let (_root, engine) = setup();
        let criteria = SearchCriteria::default().with_topic("kubectl");
        assert!(engine.search_entries(&criteria, false).unwrap().is_empty());

        let deep = engine.search_entries(&criteria, true).unwrap();
        assert_eq!(deep.len(), 1);
        assert_eq!(deep[0].session_id, "orphan-1");
    }

    #[test]
    fn test_deep_search_respects_other_criteria() {
        let (_root, engine) = setup();
        let criteria = SearchCriteria::default().with_topic("kubectl").with_after("2025-06-02");
        assert!(engine.search_entries(&criteria, true).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_and_lookup() {
        let (_root, engine) = setup();
        let path = engine.resolve_session("orph").unwrap();
        assert!(path.ends_with("orphan-1.jsonl"));

        let entry = engine.lookup_metadata("orphan-1").unwrap();
        assert_eq!(entry.first_prompt, "write docs");
        assert!(engine.lookup_metadata("missing").is_none());
    }

    #[test]
    fn test_extract_through_engine() {
        let (_root, engine) = setup();
        let path = engine.resolve_session("orphan-1").unwrap();
        let messages = engine.extract_messages(&path, 10, MessageShape::Structured).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "write docs");
    }
}
