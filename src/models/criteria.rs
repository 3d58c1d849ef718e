/// Optional constraints applied to the merged entry list.
///
/// Every field that is set must match (logical AND). An unset field places
/// no constraint. `limit` is not a criterion; it truncates the final result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Case-insensitive substring of `firstPrompt` or `summary`
    pub topic: Option<String>,
    /// Inclusive lower date bound (`YYYY-MM-DD` or a full timestamp)
    pub after: Option<String>,
    /// Inclusive upper date bound (`YYYY-MM-DD` or a full timestamp)
    pub before: Option<String>,
    /// Case-insensitive substring of `gitBranch`
    pub branch: Option<String>,
    /// Case-insensitive substring of `projectPath`
    pub project: Option<String>,
    pub limit: Option<usize>,
}

impl SearchCriteria {
    pub fn with_topic(mut self, topic: &str) -> Self {
        self.topic = Some(topic.to_string());
        self
    }

    pub fn with_after(mut self, after: &str) -> Self {
        self.after = Some(after.to_string());
        self
    }

    pub fn with_before(mut self, before: &str) -> Self {
        self.before = Some(before.to_string());
        self
    }

    pub fn with_branch(mut self, branch: &str) -> Self {
        self.branch = Some(branch.to_string());
        self
    }

    pub fn with_project(mut self, project: &str) -> Self {
        self.project = Some(project.to_string());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// True when no constraint is set (`limit` does not count)
    pub fn is_empty(&self) -> bool {
        self.topic.is_none()
            && self.after.is_none()
            && self.before.is_none()
            && self.branch.is_none()
            && self.project.is_none()
    }

    /// Same constraints with the topic removed
    pub fn without_topic(&self) -> Self {
        Self { topic: None, ..self.clone() }
    }
}
