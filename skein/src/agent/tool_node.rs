//! Tool node: executes the tool calls of the latest assistant message.
//!
//! For each call, in order: parse the JSON arguments, call the tool through the
//! `ToolSource`, and append a `Message::Tool` answering that call id.
//!
//! # Error handling
//!
//! - `HandleToolErrors::Never`: a failing tool fails the node (default).
//! - `HandleToolErrors::Always`: the error becomes the tool message content, so the
//!   model can see it and try again.
//! - `HandleToolErrors::Custom(handler)`: the handler writes the tool message content.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::AgentError;
use crate::graph::Node;
use crate::message::Message;
use crate::state::HasMessages;
use crate::tool_source::{ToolSource, ToolSourceError};

/// Default execution error message template with tool name and kwargs.
pub const DEFAULT_EXECUTION_ERROR_TEMPLATE: &str =
    "Error executing tool '{tool_name}' with kwargs {tool_kwargs} with error:\n {error}\n Please fix the error and try again.";

/// Error handler function type: `(error, tool_name, arguments) -> message content`.
pub type ErrorHandlerFn = Arc<dyn Fn(&ToolSourceError, &str, &Value) -> String + Send + Sync>;

/// Configuration for how ToolNode handles tool errors.
#[derive(Clone, Default)]
pub enum HandleToolErrors {
    #[default]
    Never,
    /// Report the error to the model; `Some(text)` replaces the default template.
    Always(Option<String>),
    Custom(ErrorHandlerFn),
}

impl fmt::Debug for HandleToolErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => write!(f, "HandleToolErrors::Never"),
            Self::Always(msg) => write!(f, "HandleToolErrors::Always({:?})", msg),
            Self::Custom(_) => write!(f, "HandleToolErrors::Custom(<fn>)"),
        }
    }
}

fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}

/// Parses ToolCall.arguments to JSON. Empty text is `{}`; a JSON string holding
/// JSON is decoded once more. Invalid JSON is an `InvalidInput` error.
fn parse_tool_arguments(arguments: &str) -> Result<Value, ToolSourceError> {
    if arguments.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }
    let raw: Value = serde_json::from_str(arguments).map_err(|e| {
        warn!(error = %e, arguments = %arguments, "tool arguments JSON parse failed");
        ToolSourceError::InvalidInput(format!("arguments are not valid JSON: {}", e))
    })?;
    match raw.as_str() {
        Some(inner) => Ok(serde_json::from_str(inner).unwrap_or(raw)),
        None => Ok(raw),
    }
}

/// Tool-execution node.
#[derive(Clone)]
pub struct ToolNode {
    tools: Arc<dyn ToolSource>,
    handle_tool_errors: HandleToolErrors,
}

impl ToolNode {
    pub fn new(tools: Arc<dyn ToolSource>) -> Self {
        Self {
            tools,
            handle_tool_errors: HandleToolErrors::Never,
        }
    }

    pub fn with_handle_tool_errors(mut self, handle_tool_errors: HandleToolErrors) -> Self {
        self.handle_tool_errors = handle_tool_errors;
        self
    }

    /// Runs every tool call on `latest` and returns one tool message per call, in
    /// call order. A message without tool calls yields no messages.
    pub fn execute_pending_tool_calls(&self, latest: &Message) -> Result<Vec<Message>, AgentError> {
        let calls = latest.tool_calls();
        let mut results = Vec::with_capacity(calls.len());
        for tc in calls {
            let result = parse_tool_arguments(&tc.arguments).and_then(|args| {
                debug!(tool = %tc.name, args = ?args, "Calling tool");
                self.tools.call_tool(&tc.name, args)
            });
            let content = match result {
                Ok(content) => content.text,
                Err(e) => {
                    warn!(tool = %tc.name, error = %e, "Tool call failed");
                    let args = parse_tool_arguments(&tc.arguments)
                        .unwrap_or_else(|_| Value::String(tc.arguments.clone()));
                    match self.handle_error(&e, &tc.name, &args) {
                        Some(text) => text,
                        None => return Err(AgentError::Tool(e)),
                    }
                }
            };
            trace!(
                tool = %tc.name,
                result_len = content.len(),
                result_preview = %truncate_for_log(&content, 200),
                "Tool returned"
            );
            results.push(Message::tool(tc.id.clone(), tc.name.clone(), content));
        }
        Ok(results)
    }

    fn handle_error(
        &self,
        error: &ToolSourceError,
        tool_name: &str,
        tool_args: &Value,
    ) -> Option<String> {
        match &self.handle_tool_errors {
            HandleToolErrors::Never => None,
            HandleToolErrors::Always(custom_msg) => Some(custom_msg.clone().unwrap_or_else(|| {
                DEFAULT_EXECUTION_ERROR_TEMPLATE
                    .replace("{tool_name}", tool_name)
                    .replace("{tool_kwargs}", &tool_args.to_string())
                    .replace("{error}", &error.to_string())
            })),
            HandleToolErrors::Custom(handler) => Some(handler(error, tool_name, tool_args)),
        }
    }
}

impl fmt::Debug for ToolNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolNode")
            .field("handle_tool_errors", &self.handle_tool_errors)
            .finish_non_exhaustive()
    }
}

impl<S: HasMessages> Node<S> for ToolNode {
    fn run(&self, state: &S) -> Result<S::Update, AgentError> {
        let Some(latest) = state.last_message().filter(|m| m.has_tool_calls()) else {
            warn!("Tool node ran without a pending tool call");
            return Ok(S::append_messages(Vec::new()));
        };
        let results = self.execute_pending_tool_calls(latest)?;
        Ok(S::append_messages(results))
    }
}
