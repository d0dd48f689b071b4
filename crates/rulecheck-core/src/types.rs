//! Request and chat message types shared across the check pipeline.

use serde::{Deserialize, Serialize};

/// Inbound payload for a rule check.
///
/// Both fields are required. A body missing either one fails
/// deserialization and is rejected at the HTTP boundary before any
/// prompt is built; unknown extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// The document under inspection
    pub document: String,

    /// The natural-language rule the document must satisfy
    pub rule: String,
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instruction framing from us
    System,
    /// Caller-supplied content
    User,
}

/// A chat message for LLM completion.
///
/// Messages are built fresh for each request and discarded after the
/// completion call returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system" or "user"
    pub role: Role,

    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_creation() {
        let system = ChatMessage::system("You are a linter.");
        assert_eq!(system.role, Role::System);
        assert_eq!(system.content, "You are a linter.");

        let user = ChatMessage::user("Hello!");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = ChatMessage::system("x");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");

        let msg = ChatMessage::user("y");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_check_request_requires_both_fields() {
        assert!(serde_json::from_str::<CheckRequest>(r#"{"document":"d"}"#).is_err());
        assert!(serde_json::from_str::<CheckRequest>(r#"{"rule":"r"}"#).is_err());
        assert!(serde_json::from_str::<CheckRequest>("{}").is_err());
    }

    #[test]
    fn test_check_request_ignores_unknown_fields() {
        let req: CheckRequest =
            serde_json::from_str(r#"{"document":"d","rule":"r","extra":42}"#).unwrap();
        assert_eq!(req.document, "d");
        assert_eq!(req.rule, "r");
    }
}
