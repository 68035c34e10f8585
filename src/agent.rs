//! Single-step responder
//!
//! A one-node graph: the `agent` node sends the whole transcript to the
//! completion model and appends the reply, then the run ends.

use crate::graph::{CompilationError, CompiledGraph, GraphState, Node, RunConfig, StateGraph, END};
use crate::llm::{LlmError, LlmRequest, LlmService};
use crate::transcript::{Message, Transcript};
use async_trait::async_trait;
use std::sync::Arc;

pub const AGENT_NODE: &str = "agent";

/// Graph state: the conversation so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentState {
    pub messages: Transcript,
}

/// Messages a node wants appended to the conversation
#[derive(Debug, Clone, Default)]
pub struct AgentUpdate {
    pub messages: Vec<Message>,
}

impl GraphState for AgentState {
    type Update = AgentUpdate;

    fn apply(&mut self, update: AgentUpdate) {
        self.messages.extend(update.messages);
    }
}

/// Calls the model with the current transcript and returns its reply
pub struct ModelNode {
    llm: Arc<dyn LlmService>,
}

impl ModelNode {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<AgentState, LlmError> for ModelNode {
    async fn run(&self, state: &AgentState, _config: &RunConfig) -> Result<AgentUpdate, LlmError> {
        tracing::debug!(messages = state.messages.len(), "calling model");
        let request = LlmRequest::from_messages(state.messages.messages());
        let response = self.llm.complete(&request).await?;
        Ok(AgentUpdate {
            messages: vec![Message::assistant(response.text)],
        })
    }
}

/// The compiled agent graph
pub struct Responder {
    graph: CompiledGraph<AgentState, LlmError>,
    model_id: String,
}

impl Responder {
    pub fn new(llm: Arc<dyn LlmService>) -> Result<Self, CompilationError> {
        let model_id = llm.model_id().to_string();

        let mut graph = StateGraph::new();
        graph
            .add_node(AGENT_NODE, ModelNode::new(llm))
            .set_entry_point(AGENT_NODE)
            .add_edge(AGENT_NODE, END);

        Ok(Self {
            graph: graph.compile()?,
            model_id,
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Run one model call over `transcript`.
    ///
    /// On success the result is the input with exactly one assistant message
    /// appended. Model failures come back untouched.
    pub async fn respond(
        &self,
        transcript: Transcript,
        config: &RunConfig,
    ) -> Result<Transcript, LlmError> {
        let state = AgentState {
            messages: transcript,
        };
        let output = self.graph.invoke(state, config).await?;
        Ok(output.messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::MockLlmService;
    use crate::llm::{LlmErrorKind, MessageRole};
    use crate::transcript::Role;
    use proptest::prelude::*;

    fn responder(mock: &Arc<MockLlmService>) -> Responder {
        Responder::new(mock.clone()).unwrap()
    }

    #[tokio::test]
    async fn test_reply_is_appended() {
        let mock = Arc::new(MockLlmService::new("mock-model"));
        mock.queue_text("4");
        let responder = responder(&mock);

        let input = Transcript::from(vec![Message::human("2+2?")]);
        let output = responder
            .respond(input, &RunConfig::new("1"))
            .await
            .unwrap();

        assert_eq!(
            output.messages(),
            &[Message::human("2+2?"), Message::assistant("4")]
        );
        assert_eq!(responder.model_id(), "mock-model");
    }

    #[tokio::test]
    async fn test_whole_transcript_is_sent_once() {
        let mock = Arc::new(MockLlmService::new("mock-model"));
        mock.queue_text("fine");
        let responder = responder(&mock);

        let input = Transcript::from(vec![
            Message::human("hi"),
            Message::assistant("hello"),
            Message::human("how are you?"),
        ]);
        responder.respond(input, &RunConfig::new("1")).await.unwrap();

        let requests = mock.recorded_requests();
        assert_eq!(requests.len(), 1);
        let roles: Vec<MessageRole> = requests[0].messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
        );
        assert_eq!(requests[0].messages[2].text, "how are you?");
    }

    #[tokio::test]
    async fn test_model_error_propagates_unchanged() {
        let mock = Arc::new(MockLlmService::new("mock-model"));
        mock.queue_error(LlmError::rate_limit("Rate limit exceeded: quota"));
        let responder = responder(&mock);

        let input = Transcript::from(vec![Message::human("hi")]);
        let err = responder
            .respond(input, &RunConfig::new("1"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, LlmErrorKind::RateLimit);
        assert_eq!(err.message, "Rate limit exceeded: quota");
    }

    fn arb_message() -> impl Strategy<Value = Message> {
        ("[a-z ?]{0,20}", any::<bool>()).prop_map(|(text, human)| {
            if human {
                Message::human(text)
            } else {
                Message::assistant(text)
            }
        })
    }

    proptest! {
        #[test]
        fn respond_appends_exactly_one_assistant_message(
            messages in proptest::collection::vec(arb_message(), 0..10),
            reply in "[a-zA-Z0-9 ]{0,30}",
        ) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let mock = Arc::new(MockLlmService::new("mock-model"));
            mock.queue_text(reply.clone());
            let responder = responder(&mock);

            let input = Transcript::from(messages.clone());
            let output = rt
                .block_on(responder.respond(input, &RunConfig::new("1")))
                .unwrap();

            prop_assert_eq!(output.len(), messages.len() + 1);
            prop_assert_eq!(&output.messages()[..messages.len()], messages.as_slice());
            let last = output.last().unwrap();
            prop_assert_eq!(last.role(), Role::Assistant);
            prop_assert_eq!(last.text(), reply.as_str());
        }

        #[test]
        fn respond_never_returns_partial_output_on_error(
            messages in proptest::collection::vec(arb_message(), 0..10),
        ) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let mock = Arc::new(MockLlmService::new("mock-model"));
            mock.queue_error(LlmError::network("connection reset"));
            let responder = responder(&mock);

            let result = rt.block_on(responder.respond(Transcript::from(messages), &RunConfig::new("1")));
            prop_assert!(result.is_err());
        }
    }
}
