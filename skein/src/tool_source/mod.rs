//! Tool source abstraction: list tools and call a tool.
//!
//! Nodes depend on `ToolSource` instead of a concrete tool registry. The chat model
//! learns about tools from `list_tools()` (see `ChatOpenAI::with_tools`); the tool
//! node runs them through `call_tool(name, args)`.
//!
//! Implementations: [`FnToolSource`], a registry of plain Rust functions keyed by
//! tool name.

mod fn_tool_source;

pub use fn_tool_source::{FnToolSource, ToolFn};

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Tool specification: name, description and JSON Schema of the arguments.
///
/// Serialized into the `tools` array of a chat completion request.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    /// Tool name, as the model will call it.
    pub name: String,
    /// Human-readable description for the model.
    pub description: Option<String>,
    /// JSON Schema for arguments.
    pub input_schema: Value,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            input_schema,
        }
    }
}

/// Result of a single tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallContent {
    /// Result text; becomes the content of the `Message::Tool` reply.
    pub text: String,
}

impl ToolCallContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Errors from listing or calling tools.
///
/// Nodes map these into `AgentError::Tool` when running the graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error("tool failed: {0}")]
    Execution(String),
}

/// Tool source: list tools and call a tool.
///
/// Calls are synchronous and run on the graph's thread.
pub trait ToolSource: Send + Sync {
    /// List available tools.
    fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError>;

    /// Call a tool by name with JSON arguments.
    fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolCallContent, ToolSourceError>;
}

/// Decodes tool arguments into `T`, mapping failures to `InvalidInput`.
///
/// ```rust
/// use serde::Deserialize;
/// use skein::tool_source::parse_arguments;
///
/// #[derive(Deserialize)]
/// struct Args {
///     a: i64,
///     b: i64,
/// }
///
/// let args: Args = parse_arguments(serde_json::json!({"a": 2, "b": 3})).unwrap();
/// assert_eq!(args.a * args.b, 6);
/// ```
pub fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolSourceError> {
    serde_json::from_value(arguments).map_err(|e| ToolSourceError::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display of each ToolSourceError variant contains expected keywords.
    #[test]
    fn tool_source_error_display_all_variants() {
        let s = ToolSourceError::NotFound("x".into()).to_string();
        assert!(s.contains("not found"), "{}", s);
        let s = ToolSourceError::InvalidInput("bad".into()).to_string();
        assert!(s.contains("invalid"), "{}", s);
        let s = ToolSourceError::Execution("boom".into()).to_string();
        assert!(s.contains("boom"), "{}", s);
    }

    /// **Scenario**: arguments of the wrong shape are InvalidInput.
    #[test]
    fn parse_arguments_rejects_wrong_shape() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Args {
            a: i64,
        }
        let err = parse_arguments::<Args>(serde_json::json!({"a": "two"})).unwrap_err();
        assert!(matches!(err, ToolSourceError::InvalidInput(_)));
    }

    /// **Scenario**: ToolSpec serializes with its schema.
    #[test]
    fn tool_spec_serializes() {
        let spec = ToolSpec::new("get_time", "Get time", serde_json::json!({"type": "object"}));
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["name"], "get_time");
        assert_eq!(json["description"], "Get time");
        assert_eq!(json["input_schema"]["type"], "object");
    }
}
