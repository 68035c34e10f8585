//! API request and response types

use crate::transcript::ChatTurn;
use serde::{Deserialize, Serialize};

/// Request to answer a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Response for chat action
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Static text shown by the chat widget
#[derive(Debug, Clone, Serialize)]
pub struct PageInfo {
    pub title: String,
    pub description: String,
    pub examples: Vec<String>,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            title: "Gemini Chat".to_string(),
            description: "A single-node agent graph that sends the conversation to Gemini."
                .to_string(),
            examples: vec![
                "What is a state graph?".to_string(),
                "How does the Gemini model work?".to_string(),
                "Tell me a short joke.".to_string(),
            ],
        }
    }
}

/// Response for the widget's info request
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    #[serde(flatten)]
    pub page: PageInfo,
    pub model: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
