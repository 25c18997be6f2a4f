//! Conversation messages.
//!
//! A [`Message`] is created once and never mutated afterwards. The
//! constructors stamp a fresh UUID and the current time.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The local user typing into the input box.
    User,
    /// The responder producing replies.
    Assistant,
}

impl Role {
    /// Short name used in the log header (`user@...` / `agent@...`).
    pub fn short_name(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "agent",
        }
    }
}

/// A single message in the conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: Uuid,
    role: Role,
    content: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Unique message ID.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Role of the message author.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Message content (may contain markdown).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Creation time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Author label such as `user@agentj` or `agent@agentj`.
    pub fn author_label(&self, handle: &str) -> String {
        format!("{}@{handle}", self.role.short_name())
    }

    /// Local wall-clock time formatted as `HH:MM`.
    pub fn time_label(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_role() {
        assert_eq!(Message::user("hi").role(), Role::User);
        assert_eq!(Message::assistant("hello").role(), Role::Assistant);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Message::user("same");
        let b = Message::user("same");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_author_label() {
        assert_eq!(Message::user("x").author_label("agentj"), "user@agentj");
        assert_eq!(
            Message::assistant("x").author_label("agentj"),
            "agent@agentj"
        );
    }

    #[test]
    fn test_time_label_format() {
        let label = Message::user("x").time_label();
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
