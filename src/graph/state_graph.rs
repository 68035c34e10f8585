//! Graph builder

use super::compiled::{CompiledGraph, Step};
use super::{GraphState, Node, END};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Why a graph could not be compiled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilationError {
    #[error("graph has no entry point")]
    MissingEntryPoint,
    #[error("node not found: {0}")]
    NodeNotFound(String),
    #[error("node id {0:?} is reserved")]
    ReservedId(String),
    #[error("node {0} has more than one outgoing edge")]
    DuplicateEdge(String),
    #[error("node {0} has no outgoing edge")]
    DeadEnd(String),
    #[error("cycle through node {0}")]
    Cycle(String),
}

/// Mutable graph description; call [`StateGraph::compile`] to run it
pub struct StateGraph<S: GraphState, E> {
    nodes: HashMap<String, Box<dyn Node<S, E>>>,
    edges: Vec<(String, String)>,
    entry: Option<String>,
}

impl<S: GraphState, E> Default for StateGraph<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GraphState, E> StateGraph<S, E> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            entry: None,
        }
    }

    /// Register a node. Re-using an id replaces the earlier node.
    pub fn add_node(&mut self, id: impl Into<String>, node: impl Node<S, E> + 'static) -> &mut Self {
        self.nodes.insert(id.into(), Box::new(node));
        self
    }

    pub fn set_entry_point(&mut self, id: impl Into<String>) -> &mut Self {
        self.entry = Some(id.into());
        self
    }

    /// Add an edge; `to` may be [`END`].
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.push((from.into(), to.into()));
        self
    }

    /// Validate and freeze the graph.
    ///
    /// Every node needs exactly one outgoing edge, and following edges from
    /// the entry point must reach [`END`] without revisiting a node.
    pub fn compile(self) -> Result<CompiledGraph<S, E>, CompilationError> {
        if self.nodes.contains_key(END) {
            return Err(CompilationError::ReservedId(END.to_string()));
        }
        let entry = self.entry.ok_or(CompilationError::MissingEntryPoint)?;
        if !self.nodes.contains_key(&entry) {
            return Err(CompilationError::NodeNotFound(entry));
        }

        let mut next: HashMap<String, String> = HashMap::new();
        for (from, to) in self.edges {
            if !self.nodes.contains_key(&from) {
                return Err(CompilationError::NodeNotFound(from));
            }
            if to != END && !self.nodes.contains_key(&to) {
                return Err(CompilationError::NodeNotFound(to));
            }
            if next.contains_key(&from) {
                return Err(CompilationError::DuplicateEdge(from));
            }
            next.insert(from, to);
        }

        // Sorted so the reported dead end does not depend on hash order.
        let mut ids: Vec<String> = self.nodes.keys().cloned().collect();
        ids.sort();
        if let Some(dead) = ids.iter().find(|id| !next.contains_key(*id)) {
            return Err(CompilationError::DeadEnd(dead.clone()));
        }

        let mut seen = HashSet::new();
        let mut current = entry.as_str();
        while current != END {
            if !seen.insert(current) {
                return Err(CompilationError::Cycle(current.to_string()));
            }
            current = next[current].as_str();
        }

        let index: HashMap<&str, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        let entry_index = index[entry.as_str()];

        let mut nodes = self.nodes;
        let steps = ids
            .iter()
            .filter_map(|id| {
                let node = nodes.remove(id)?;
                let target = next[id].as_str();
                let next_index = (target != END).then(|| index[target]);
                Some(Step {
                    id: id.clone(),
                    node,
                    next: next_index,
                })
            })
            .collect();

        Ok(CompiledGraph::new(steps, entry_index))
    }
}
