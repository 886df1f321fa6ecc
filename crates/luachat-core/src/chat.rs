//! Chat message and conversation summary types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ids::{ChatId, MessageId};

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text typed by the person at the keyboard.
    User,
    /// Reply from the assistant (or a locally produced notice in its voice).
    Assistant,
}

impl FromStr for Role {
    type Err = CoreError;

    /// Accepts the local names and the server's `bot` alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" | "bot" => Ok(Role::Assistant),
            other => Err(CoreError::UnknownRole(other.to_string())),
        }
    }
}

/// A message in the viewed conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Set on the optimistic user message until the server confirms it.
    #[serde(default)]
    pub provisional: bool,
}

impl Message {
    /// Create a message from server-confirmed data.
    pub fn new(
        id: impl Into<MessageId>,
        role: Role,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            timestamp,
            provisional: false,
        }
    }

    /// Create a local assistant message stamped now.
    pub fn local_assistant(content: impl Into<String>) -> Self {
        Self::new(MessageId::generate(), Role::Assistant, content, Utc::now())
    }

    /// Create the optimistic user message for text that is about to be sent.
    pub fn provisional_user(content: impl Into<String>) -> Self {
        Self {
            provisional: true,
            ..Self::new(MessageId::generate(), Role::User, content, Utc::now())
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Lightweight descriptor of a stored conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: ChatId,
    pub title: String,
    pub last_message_preview: String,
    /// Last activity.
    pub timestamp: DateTime<Utc>,
}
