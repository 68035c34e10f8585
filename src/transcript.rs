//! Conversation transcript types
//!
//! A transcript is rebuilt from the widget's history on every request; nothing
//! here is persisted.

#[cfg(test)]
mod proptests;

use serde::{Deserialize, Serialize};

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Human,
    Assistant,
}

/// One turn of dialogue tagged with its originator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    role: Role,
    text: String,
}

impl Message {
    pub fn human(text: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A prior exchange as the chat widget reports it: `[human, assistant]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn(pub String, pub String);

impl ChatTurn {
    #[allow(dead_code)] // Used by tests; the widget sends turns as JSON
    pub fn new(human: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self(human.into(), assistant.into())
    }
}

/// Ordered history of messages for one conversation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[allow(dead_code)] // Pairs with len()
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<Vec<Message>> for Transcript {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

impl Extend<Message> for Transcript {
    fn extend<I: IntoIterator<Item = Message>>(&mut self, iter: I) {
        self.messages.extend(iter);
    }
}

/// Build the transcript for one request: every prior pair as human then
/// assistant, in order, followed by the new human turn.
///
/// No validation happens here. Empty strings are kept as-is.
pub fn build_transcript(history: &[ChatTurn], new_text: &str) -> Transcript {
    let mut messages = Vec::with_capacity(history.len() * 2 + 1);
    for ChatTurn(human, assistant) in history {
        messages.push(Message::human(human.as_str()));
        messages.push(Message::assistant(assistant.as_str()));
    }
    messages.push(Message::human(new_text));
    Transcript::from(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_prior_turn() {
        let history = vec![ChatTurn::new("hi", "hello")];
        let transcript = build_transcript(&history, "how are you?");

        assert_eq!(
            transcript.messages(),
            &[
                Message::human("hi"),
                Message::assistant("hello"),
                Message::human("how are you?"),
            ]
        );
    }

    #[test]
    fn test_empty_history() {
        let transcript = build_transcript(&[], "2+2?");
        assert_eq!(transcript.messages(), &[Message::human("2+2?")]);
    }

    #[test]
    fn test_empty_strings_pass_through() {
        let history = vec![ChatTurn::new("", "")];
        let transcript = build_transcript(&history, "");

        assert_eq!(transcript.len(), 3);
        assert!(transcript.messages().iter().all(|m| m.text().is_empty()));
        assert_eq!(transcript.last().map(Message::role), Some(Role::Human));
    }

    #[test]
    fn test_chat_turn_wire_format() {
        let turns: Vec<ChatTurn> = serde_json::from_str(r#"[["hi", "hello"], ["a", "b"]]"#).unwrap();
        assert_eq!(turns, vec![ChatTurn::new("hi", "hello"), ChatTurn::new("a", "b")]);
    }
}
