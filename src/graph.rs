//! Minimal state graph runtime
//!
//! Nodes read the current state and return an update; the graph applies the
//! update and follows the node's single outgoing edge until it reaches
//! [`END`]. There are no conditional edges, and compilation rejects cycles,
//! so every run terminates after visiting each reachable node at most once.

mod compiled;
mod state_graph;

pub use compiled::CompiledGraph;
pub use state_graph::{CompilationError, StateGraph};

use async_trait::async_trait;

/// Edge target that terminates a run
pub const END: &str = "__end__";

/// State threaded through a graph run
pub trait GraphState: Send + Sync + 'static {
    /// What a node hands back to be merged into the state
    type Update: Send;

    /// Merge a node's update into the state
    fn apply(&mut self, update: Self::Update);
}

/// One step in a graph
#[async_trait]
pub trait Node<S: GraphState, E>: Send + Sync {
    async fn run(&self, state: &S, config: &RunConfig) -> Result<S::Update, E>;
}

/// Per-invocation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub thread_id: String,
}

impl RunConfig {
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
        }
    }
}
