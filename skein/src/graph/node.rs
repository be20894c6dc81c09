//! Graph node trait: one step in a StateGraph.
//!
//! A node reads the current state and returns a partial update; it never sees the
//! graph and never chooses the next node. Routing belongs to edges.

use crate::error::AgentError;
use crate::state::State;

/// One step in a graph: `&state` in, partial update out.
///
/// Any `Fn(&S) -> Result<S::Update, AgentError> + Send + Sync` is a node, so plain
/// functions can be registered directly:
///
/// ```rust
/// use skein::{AgentError, MessagesState, MessagesUpdate, Message, StateGraph, END, START};
///
/// fn greet(_state: &MessagesState) -> Result<MessagesUpdate, AgentError> {
///     Ok(MessagesUpdate::append(vec![Message::assistant("hello")]))
/// }
///
/// let mut graph = StateGraph::<MessagesState>::new();
/// graph.add_node("greet", greet).unwrap();
/// graph.add_edge(START, "greet").unwrap();
/// graph.add_edge("greet", END).unwrap();
/// let compiled = graph.compile().unwrap();
/// let out = compiled.invoke(MessagesState::from_user("hi")).unwrap();
/// assert_eq!(out.messages.len(), 2);
/// ```
///
/// Structs with configuration (e.g. [`ChatNode`](crate::agent::ChatNode)) implement
/// the trait themselves.
pub trait Node<S: State>: Send + Sync {
    /// Runs the node against the current state.
    fn run(&self, state: &S) -> Result<S::Update, AgentError>;
}

impl<S, F> Node<S> for F
where
    S: State,
    F: Fn(&S) -> Result<S::Update, AgentError> + Send + Sync,
{
    fn run(&self, state: &S) -> Result<S::Update, AgentError> {
        self(state)
    }
}

/// A node that does nothing; it returns the empty update.
///
/// Useful as a join point or placeholder while sketching a graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameNode;

impl<S: State> Node<S> for NameNode {
    fn run(&self, _state: &S) -> Result<S::Update, AgentError> {
        Ok(S::Update::default())
    }
}
