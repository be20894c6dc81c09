//! Tool source backed by Rust functions.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

/// A tool implementation: JSON arguments in, text result out.
pub type ToolFn = Arc<dyn Fn(Value) -> Result<ToolCallContent, ToolSourceError> + Send + Sync>;

/// Registry of function tools, listed in registration order.
///
/// ```rust
/// use serde::Deserialize;
/// use skein::tool_source::{parse_arguments, FnToolSource, ToolCallContent, ToolSource, ToolSpec};
///
/// #[derive(Deserialize)]
/// struct Pair {
///     a: i64,
///     b: i64,
/// }
///
/// let tools = FnToolSource::new().with_tool(
///     ToolSpec::new("multiply", "Multiply a and b.", serde_json::json!({"type": "object"})),
///     |args| {
///         let Pair { a, b } = parse_arguments(args)?;
///         Ok(ToolCallContent::text((a * b).to_string()))
///     },
/// );
/// let out = tools.call_tool("multiply", serde_json::json!({"a": 2, "b": 3})).unwrap();
/// assert_eq!(out.text, "6");
/// ```
#[derive(Clone, Default)]
pub struct FnToolSource {
    tools: Vec<(ToolSpec, ToolFn)>,
}

impl FnToolSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool; a tool with the same name is replaced in place.
    pub fn register<F>(&mut self, spec: ToolSpec, tool: F) -> &mut Self
    where
        F: Fn(Value) -> Result<ToolCallContent, ToolSourceError> + Send + Sync + 'static,
    {
        let tool: ToolFn = Arc::new(tool);
        match self.tools.iter_mut().find(|(s, _)| s.name == spec.name) {
            Some(slot) => *slot = (spec, tool),
            None => self.tools.push((spec, tool)),
        }
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_tool<F>(mut self, spec: ToolSpec, tool: F) -> Self
    where
        F: Fn(Value) -> Result<ToolCallContent, ToolSourceError> + Send + Sync + 'static,
    {
        self.register(spec, tool);
        self
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl fmt::Debug for FnToolSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnToolSource")
            .field(
                "tools",
                &self.tools.iter().map(|(s, _)| s.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ToolSource for FnToolSource {
    fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.tools.iter().map(|(spec, _)| spec.clone()).collect())
    }

    fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolCallContent, ToolSourceError> {
        let (_, tool) = self
            .tools
            .iter()
            .find(|(spec, _)| spec.name == name)
            .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
        tracing::debug!(tool = name, "Calling tool");
        tool(arguments)
    }
}
