//! Build-time and run-time graph errors.
//!
//! [`BuildError`] is returned eagerly by `add_node` / `add_edge` /
//! `add_conditional_edges`; [`RunError`] by `invoke` and `stream`. Run errors carry
//! the state as of the last successful node so callers can inspect partial progress.

use std::fmt::Debug;

use thiserror::Error;

use crate::error::AgentError;

/// Error registering a node or edge. The graph is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A node with this name is already registered.
    #[error("duplicate node: {0}")]
    DuplicateNode(String),

    /// An edge endpoint (other than START/END) is not a registered node.
    #[error("node not found: {0}")]
    UnknownNode(String),

    /// START and END can not be used as node names.
    #[error("reserved node name: {0}")]
    ReservedName(String),

    /// Edges can not leave END or enter START.
    #[error("invalid edge {from} -> {to}")]
    InvalidEndpoint { from: String, to: String },
}

/// Error while running a compiled graph.
#[derive(Debug, Error)]
pub enum RunError<S: Debug> {
    /// A node returned an error. `state` is the state before that node ran.
    #[error("node `{node}` failed: {source}")]
    NodeExecution {
        node: String,
        #[source]
        source: AgentError,
        state: S,
    },

    /// The router after `node` returned `key`, which resolves to no node and not END.
    #[error("router after `{node}` returned unknown key `{key}`")]
    Routing { node: String, key: String, state: S },

    /// The configured step limit was reached before END.
    #[error("recursion limit of {limit} steps reached without hitting END")]
    RecursionLimit { limit: usize, state: S },
}

impl<S: Debug> RunError<S> {
    /// State as of the last successful node.
    pub fn state(&self) -> &S {
        match self {
            Self::NodeExecution { state, .. }
            | Self::Routing { state, .. }
            | Self::RecursionLimit { state, .. } => state,
        }
    }

    /// Consumes the error, returning the state as of the last successful node.
    pub fn into_state(self) -> S {
        match self {
            Self::NodeExecution { state, .. }
            | Self::Routing { state, .. }
            | Self::RecursionLimit { state, .. } => state,
        }
    }

    /// Node the error is attributed to; `None` for a recursion limit.
    pub fn node(&self) -> Option<&str> {
        match self {
            Self::NodeExecution { node, .. } | Self::Routing { node, .. } => Some(node),
            Self::RecursionLimit { .. } => None,
        }
    }
}
