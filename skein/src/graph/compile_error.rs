//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when the registered nodes and edges do not form
//! a runnable graph. Validation does not stop at the first problem; every defect
//! found is listed.

use thiserror::Error;

/// One structural problem found while compiling a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Defect {
    /// No edge leaves START.
    #[error("no edge from START")]
    MissingEntry,

    /// More than one edge leaves START; the targets are listed.
    #[error("more than one edge from START: {}", .0.join(", "))]
    MultipleEntries(Vec<String>),

    /// START goes straight to END, so there is no node to run.
    #[error("START leads directly to END")]
    EntryIsEnd,

    /// A node has more than one outgoing declaration (edges and/or routers).
    #[error("node `{0}` has more than one outgoing edge")]
    MultipleOutgoing(String),

    /// A node has no outgoing edge and no router.
    #[error("node `{0}` has no outgoing edge")]
    DeadEnd(String),

    /// A router destination (path map value, or typed branch key) is neither a node nor END.
    #[error("router on `{from}` targets unknown node `{to}`")]
    UnknownTarget { from: String, to: String },

    /// A node can not be reached from START.
    #[error("node `{0}` is unreachable from START")]
    Unreachable(String),

    /// END can not be reached from a node that START reaches.
    #[error("END is unreachable from node `{0}`")]
    CannotReachEnd(String),
}

/// Error when compiling a state graph.
///
/// Carries every [`Defect`] found, in a stable order: entry problems first, then
/// per-node problems in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("graph validation failed: {}", describe(.defects))]
pub struct CompilationError {
    pub defects: Vec<Defect>,
}

impl CompilationError {
    /// True when `defect` is among the defects found.
    pub fn contains(&self, defect: &Defect) -> bool {
        self.defects.contains(defect)
    }
}

fn describe(defects: &[Defect]) -> String {
    defects
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
