//! Chat callback used by the web widget

use crate::agent::Responder;
use crate::graph::RunConfig;
use crate::llm::LlmError;
use crate::transcript::{build_transcript, ChatTurn, Transcript};

/// The widget has no notion of sessions; every run shares this thread id.
pub const THREAD_ID: &str = "1";

pub struct ChatHandler {
    responder: Responder,
    config: RunConfig,
}

impl ChatHandler {
    pub fn new(responder: Responder) -> Self {
        Self {
            responder,
            config: RunConfig::new(THREAD_ID),
        }
    }

    pub fn model_id(&self) -> &str {
        self.responder.model_id()
    }

    /// Answer `message` given the prior exchanges, returning the reply text.
    pub async fn handle(&self, message: &str, history: &[ChatTurn]) -> Result<String, LlmError> {
        let transcript = build_transcript(history, message);
        let output = self.responder.respond(transcript, &self.config).await?;
        reply_text(&output)
    }
}

/// Text of the message the run appended. A run always appends one, so an
/// empty transcript is reported rather than answered with "".
fn reply_text(output: &Transcript) -> Result<String, LlmError> {
    output.last().map_or_else(
        || Err(LlmError::unknown("Model run produced no reply")),
        |m| Ok(m.text().to_string()),
    )
}
