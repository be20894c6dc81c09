//! Node-level error type.
//!
//! Returned by node functions, the LLM client and the tool node. The graph runner
//! wraps it in [`RunError::NodeExecution`](crate::graph::RunError) together with the
//! failing node's name, so an LLM failure and a plain node failure look the same
//! to the caller.

use thiserror::Error;

use crate::tool_source::ToolSourceError;

/// Error raised while running one node.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. bad input, unexpected state).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The language-model call failed (transport, HTTP status, malformed response).
    #[error("llm call failed: {0}")]
    Llm(String),

    /// A tool call failed and the tool node was configured to propagate it.
    #[error("tool call failed: {0}")]
    Tool(#[from] ToolSourceError),
}

impl AgentError {
    /// Shorthand for [`AgentError::ExecutionFailed`].
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }
}
