use chrono::{DateTime, Utc};

use crate::error::{EngineError, Result};
use crate::models::{ConversationEntry, SearchCriteria};
use crate::parsers::deserializers::parse_timestamp;
use crate::utils::expand_tilde;

/// [`SearchCriteria`] prepared for repeated evaluation: lowercased needles
/// and parsed date bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledCriteria {
    topic: Option<String>,
    after: Option<DateTime<Utc>>,
    before: Option<DateTime<Utc>>,
    branch: Option<String>,
    project: Option<String>,
}

impl CompiledCriteria {
    /// Fails with `InvalidArgument` when a date bound cannot be parsed
    pub fn compile(criteria: &SearchCriteria) -> Result<Self> {
        Ok(Self {
            topic: criteria.topic.as_deref().map(str::to_lowercase),
            after: compile_bound("after", criteria.after.as_deref())?,
            before: compile_bound("before", criteria.before.as_deref())?,
            branch: criteria.branch.as_deref().map(str::to_lowercase),
            project: criteria.project.as_deref().map(|p| expand_tilde(p).to_lowercase()),
        })
    }

    /// True when every present criterion matches
    pub fn matches(&self, entry: &ConversationEntry) -> bool {
        self.matches_topic(entry)
            && self.matches_dates(entry)
            && contains_ci(&entry.git_branch, self.branch.as_deref())
            && contains_ci(&entry.project_path, self.project.as_deref())
    }

    fn matches_topic(&self, entry: &ConversationEntry) -> bool {
        let Some(topic) = self.topic.as_deref() else {
            return true;
        };
        entry.first_prompt.to_lowercase().contains(topic)
            || entry.summary.as_deref().is_some_and(|s| s.to_lowercase().contains(topic))
    }

    /// Inclusive on both ends. A bare-date `before` is midnight, so later
    /// timestamps on that same day fall outside it.
    fn matches_dates(&self, entry: &ConversationEntry) -> bool {
        if self.after.is_none() && self.before.is_none() {
            return true;
        }
        let Some(time) = entry.filter_time() else {
            return false;
        };
        self.after.is_none_or(|after| time >= after)
            && self.before.is_none_or(|before| time <= before)
    }
}

fn compile_bound(name: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|v| {
            parse_timestamp(v).ok_or_else(|| {
                EngineError::InvalidArgument(format!(
                    "invalid --{} date '{}' (expected YYYY-MM-DD or an ISO-8601 timestamp)",
                    name, v
                ))
            })
        })
        .transpose()
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| haystack.to_lowercase().contains(needle))
}

/// Keep the entries matching every present criterion, in input order
pub fn apply_criteria(
    entries: Vec<ConversationEntry>,
    criteria: &SearchCriteria,
) -> Result<Vec<ConversationEntry>> {
    if criteria.is_empty() {
        return Ok(entries);
    }
    let compiled = CompiledCriteria::compile(criteria)?;
    Ok(entries.into_iter().filter(|entry| compiled.matches(entry)).collect())
}
