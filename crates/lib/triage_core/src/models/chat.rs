//! Chat message models.
//!
//! The serialized form matches what the web client keeps in local storage, so
//! histories written by either client read back in the other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a chat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Bot,
    Error,
}

impl MessageKind {
    /// Speaker label shown next to the message.
    pub fn label(self) -> &'static str {
        match self {
            MessageKind::User => "You",
            MessageKind::Bot => "Support AI",
            MessageKind::Error => "Error",
        }
    }
}

/// One entry in the chat history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Full triage response behind a bot message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_data: Option<serde_json::Value>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::now(MessageKind::User, content.into(), None)
    }

    pub fn bot(content: impl Into<String>, full_data: serde_json::Value) -> Self {
        Self::now(MessageKind::Bot, content.into(), Some(full_data))
    }

    /// Error entry; the reason is prefixed with `Error: `.
    pub fn error(reason: impl AsRef<str>) -> Self {
        Self::now(MessageKind::Error, format!("Error: {}", reason.as_ref()), None)
    }

    fn now(kind: MessageKind, content: String, full_data: Option<serde_json::Value>) -> Self {
        Self {
            kind,
            content,
            timestamp: Utc::now(),
            full_data,
        }
    }
}
