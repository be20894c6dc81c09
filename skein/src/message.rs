//! Message types for conversation state.
//!
//! Roles: System, User, Assistant (optionally carrying tool calls) and Tool (the
//! result of one tool call). Used by [`MessagesState`](crate::state::MessagesState)
//! and by the prebuilt chat and tool nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One tool invocation requested by the model.
///
/// `arguments` is the raw JSON text from the model; the tool node parses it before
/// calling the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Id used to pair the call with its `Message::Tool` result.
    pub id: String,
    /// Tool name as listed by the tool source.
    pub name: String,
    /// Arguments as JSON text.
    pub arguments: String,
}

impl ToolCall {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// System prompt; typically first in the list.
    System(String),
    /// User input.
    User(String),
    /// Model reply. A non-empty `tool_calls` means a tool request is pending.
    Assistant {
        content: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    /// Output of one tool call, answering the call with id `call_id`.
    Tool {
        call_id: String,
        name: String,
        content: String,
    },
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Creates an assistant message without tool calls.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Creates an assistant message that requests tool calls.
    pub fn assistant_with_tool_calls(
        content: impl Into<String>,
        tool_calls: Vec<ToolCall>,
    ) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls,
        }
    }

    /// Creates a tool result message.
    pub fn tool(
        call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::Tool {
            call_id: call_id.into(),
            name: name.into(),
            content: content.into(),
        }
    }

    /// Text content of the message.
    pub fn content(&self) -> &str {
        match self {
            Self::System(c) | Self::User(c) => c,
            Self::Assistant { content, .. } | Self::Tool { content, .. } => content,
        }
    }

    /// Tool calls requested by this message; empty for anything but an assistant reply.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Self::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }

    /// True when this is an assistant message with at least one tool call.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls().is_empty()
    }

    fn title(&self) -> &'static str {
        match self {
            Self::System(_) => "System Message",
            Self::User(_) => "Human Message",
            Self::Assistant { .. } => "Ai Message",
            Self::Tool { .. } => "Tool Message",
        }
    }

    /// Multi-line, human-readable rendering used by the demos.
    ///
    /// ```text
    /// ================================ Human Message =================================
    ///
    /// Multiply 2 and 3
    /// ```
    pub fn pretty(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:=^80}", format!(" {} ", self.title()))?;
        if let Self::Tool { name, .. } = self {
            writeln!(f, "Name: {}", name)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.content())?;
        let calls = self.tool_calls();
        if !calls.is_empty() {
            if !self.content().is_empty() {
                writeln!(f)?;
            }
            write!(f, "Tool Calls:")?;
            for call in calls {
                write!(
                    f,
                    "\n  {} ({})\n Call ID: {}\n  Args: {}",
                    call.name, call.id, call.id, call.arguments
                )?;
            }
        }
        Ok(())
    }
}
