//! Conversation model and the fixed probe battery
//!
//! Messages are forwarded verbatim: no role ordering rules, no content checks.
//! Probing how a server copes with unusual orderings is the whole point.

use serde::Serialize;
use std::fmt;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const CAPITAL_QUESTION: &str = "What is the capital of France?";
const CAPITAL_ANSWER: &str = "The capital of France is Paris.";
const POPULATION_QUESTION: &str = "What is its population?";
const INFLUENCE_QUESTION: &str = "Does the previous message influence you?";

/// Message role in a chat-completion conversation
///
/// `Other` carries any role string the caller wants sent as-is
/// (e.g. "developer", "tool"); nothing checks it against a known set.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    #[serde(untagged)]
    Other(String),
}

impl MessageRole {
    pub fn as_str(&self) -> &str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Other(role) => role.as_str(),
        }
    }
}

impl From<&str> for MessageRole {
    fn from(role: &str) -> Self {
        match role {
            "system" => Self::System,
            "user" => Self::User,
            "assistant" => Self::Assistant,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single role-tagged message
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatMessage {
    role: MessageRole,
    content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Get the role
    pub fn role(&self) -> &MessageRole {
        &self.role
    }

    /// Get the content
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A labelled, immutable sequence of messages sent as one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    label: &'static str,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(label: &'static str, messages: Vec<ChatMessage>) -> Self {
        Self { label, messages }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Roles in the order they will be sent
    pub fn roles(&self) -> Vec<MessageRole> {
        roles_of(&self.messages)
    }
}

pub fn roles_of(messages: &[ChatMessage]) -> Vec<MessageRole> {
    messages.iter().map(|m| m.role().clone()).collect()
}

/// The five role orderings exercised on every run, in execution order
pub fn battery() -> Vec<Conversation> {
    vec![
        Conversation::new("User only", vec![ChatMessage::user(CAPITAL_QUESTION)]),
        Conversation::new(
            "System + User",
            vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(CAPITAL_QUESTION),
            ],
        ),
        Conversation::new(
            "User + Assistant + User",
            vec![
                ChatMessage::user(CAPITAL_QUESTION),
                ChatMessage::assistant(CAPITAL_ANSWER),
                ChatMessage::user(POPULATION_QUESTION),
            ],
        ),
        Conversation::new(
            "System + User + Assistant + User",
            vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(CAPITAL_QUESTION),
                ChatMessage::assistant(CAPITAL_ANSWER),
                ChatMessage::user(POPULATION_QUESTION),
            ],
        ),
        // Late system message: servers differ on whether they accept, hoist or reject it.
        Conversation::new(
            "System message appearing later (potentially problematic)",
            vec![
                ChatMessage::user(CAPITAL_QUESTION),
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(INFLUENCE_QUESTION),
            ],
        ),
    ]
}
