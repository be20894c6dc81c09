//! Prebuilt nodes and routing for tool-calling chat graphs.
//!
//! - [`ChatNode`]: language-model call; appends the model's reply.
//! - [`ToolNode`]: runs every tool call on the latest assistant message and
//!   appends one tool message per call.
//! - [`tools_condition`]: routes to `"tools"` while a tool request is pending, else END.
//!
//! All three work on any [`HasMessages`] state.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use skein::agent::{tools_condition, ChatNode, ToolNode};
//! use skein::llm::MockLlm;
//! use skein::tool_source::FnToolSource;
//! use skein::{MessagesState, StateGraph, END, START};
//!
//! let llm = Arc::new(MockLlm::with_no_tool_calls("Hi!"));
//! let tools = Arc::new(FnToolSource::new());
//!
//! let mut graph = StateGraph::<MessagesState>::new();
//! graph
//!     .add_node("call_llm", ChatNode::new(llm))?
//!     .add_node("tools", ToolNode::new(tools))?
//!     .add_edge(START, "call_llm")?
//!     .add_branch("call_llm", tools_condition, None)?
//!     .add_edge("tools", END)?;
//! let out = graph.compile()?.invoke(MessagesState::from_user("Hello there!"))?;
//! assert_eq!(out.messages.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod chat_node;
mod tool_node;

pub use chat_node::ChatNode;
pub use tool_node::{
    ErrorHandlerFn, HandleToolErrors, ToolNode, DEFAULT_EXECUTION_ERROR_TEMPLATE,
};

use crate::graph::{Branch, END};
use crate::state::HasMessages;

/// Output of the tools_condition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolsConditionResult {
    /// Route to the tools execution node ("tools").
    Tools,
    /// Route to the end node ("__end__").
    End,
}

impl ToolsConditionResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tools => "tools",
            Self::End => END,
        }
    }
}

impl Branch for ToolsConditionResult {
    const ALL: &'static [Self] = &[Self::Tools, Self::End];

    fn key(&self) -> &'static str {
        self.as_str()
    }
}

/// True when the latest message is an assistant reply that requests tool calls.
pub fn has_pending_tool_call<S: HasMessages>(state: &S) -> bool {
    state.last_message().is_some_and(|m| m.has_tool_calls())
}

/// Conditional routing: if a tool call is pending, route to tools; else end.
pub fn tools_condition<S: HasMessages>(state: &S) -> ToolsConditionResult {
    if has_pending_tool_call(state) {
        ToolsConditionResult::Tools
    } else {
        ToolsConditionResult::End
    }
}
