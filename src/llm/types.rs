//! Common types for LLM interactions

use crate::transcript::{Message, Role};

/// LLM request
#[derive(Debug, Clone, Default)]
pub struct LlmRequest {
    pub messages: Vec<LlmMessage>,
}

impl LlmRequest {
    /// Request carrying the whole conversation as context
    pub fn from_messages<'a>(messages: impl IntoIterator<Item = &'a Message>) -> Self {
        Self {
            messages: messages.into_iter().map(LlmMessage::from).collect(),
        }
    }
}

/// Message in conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmMessage {
    pub role: MessageRole,
    pub text: String,
}

impl From<&Message> for LlmMessage {
    fn from(message: &Message) -> Self {
        let role = match message.role() {
            Role::Human => MessageRole::User,
            Role::Assistant => MessageRole::Assistant,
        };
        Self {
            role,
            text: message.text().to_string(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// LLM response
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    pub text: String,
    pub end_turn: bool,
    pub usage: Usage,
}

/// Usage statistics
#[derive(Debug, Clone, Default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
