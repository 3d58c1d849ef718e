use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Map a raw record `type` to a role; other record types have none
    pub fn from_record_type(record_type: &str) -> Option<Self> {
        match record_type {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One user or assistant turn with its flattened text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    pub role: Role,
    pub timestamp: Option<String>,
    pub content: String,
}

/// How extracted message content is shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageShape {
    /// Content exactly as flattened from the log
    #[default]
    Structured,
    /// Content with terminal escape and control characters removed
    Display,
}
