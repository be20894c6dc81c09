//! Logging helpers for graph execution.
//!
//! Structured `tracing` events for graph start/complete, node execution, state
//! updates and routing. Each invocation gets a short run id so interleaved logs from
//! concurrent invocations can be told apart.

use std::fmt::Debug;

/// Log node execution start, with the input state at trace level.
pub fn log_node_start<S: Debug>(run_id: u64, node_id: &str, state: &S) {
    tracing::debug!(run_id, node_id, "Starting node execution");
    tracing::trace!(run_id, node_id, ?state, "Node execution: state");
}

/// Log node execution completion, with the returned update.
pub fn log_node_complete<U: Debug>(run_id: u64, node_id: &str, update: &U) {
    tracing::debug!(run_id, node_id, ?update, "Node execution complete");
}

/// Log the routing decision after a node.
pub fn log_route(run_id: u64, node_id: &str, key: Option<&str>, next: &str) {
    tracing::debug!(run_id, node_id, key, next, "Routing to next node");
}

/// Log graph execution start.
pub fn log_graph_start(run_id: u64, entry: &str) {
    tracing::info!(run_id, entry, "Starting graph execution");
}

/// Log graph execution completion.
pub fn log_graph_complete(run_id: u64, steps: usize) {
    tracing::info!(run_id, steps, "Graph execution complete");
}

/// Log graph execution error.
pub fn log_graph_error<E: std::error::Error>(run_id: u64, error: &E) {
    tracing::error!(run_id, %error, "Graph execution error");
}
