//! Compiled graph: immutable, supports invoke only

use super::{GraphState, Node, RunConfig};
use tracing::Instrument;

pub(super) struct Step<S: GraphState, E> {
    pub(super) id: String,
    pub(super) node: Box<dyn Node<S, E>>,
    /// Index of the following step; `None` means END
    pub(super) next: Option<usize>,
}

/// Executable graph produced by [`super::StateGraph::compile`]
pub struct CompiledGraph<S: GraphState, E> {
    steps: Vec<Step<S, E>>,
    entry: usize,
}

impl<S: GraphState, E> CompiledGraph<S, E> {
    pub(super) fn new(steps: Vec<Step<S, E>>, entry: usize) -> Self {
        Self { steps, entry }
    }

    /// Ids of the nodes in this graph, sorted
    #[allow(dead_code)] // Introspection for tests
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.id.as_str())
    }

    /// Run from the entry point until END.
    ///
    /// A node error stops the run and is returned exactly as the node
    /// produced it; the partially updated state is dropped.
    pub async fn invoke(&self, state: S, config: &RunConfig) -> Result<S, E> {
        let span = tracing::info_span!("graph_run", thread_id = %config.thread_id);
        self.run_steps(state, config).instrument(span).await
    }

    async fn run_steps(&self, mut state: S, config: &RunConfig) -> Result<S, E> {
        let mut current = Some(self.entry);
        while let Some(index) = current {
            let step = &self.steps[index];
            tracing::debug!(node = %step.id, "running node");
            let update = step.node.run(&state, config).await?;
            state.apply(update);
            current = step.next;
        }
        Ok(state)
    }
}
