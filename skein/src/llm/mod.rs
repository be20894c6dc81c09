//! LLM client abstraction for the chat node.
//!
//! `ChatNode` depends on a callable that returns assistant text and optional
//! tool calls; this module defines the trait, a scripted mock and a blocking
//! OpenAI-compatible client.

mod mock;
mod openai;

pub use mock::MockLlm;
pub use openai::{ChatOpenAI, OpenAIConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

use crate::error::AgentError;
use crate::message::{Message, ToolCall};

/// Tool choice mode for chat completions: when tools are present, controls whether
/// the model may choose (auto), must not use (none), or must use (required).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToolChoiceMode {
    /// Model can pick between message or tool calls. Default when tools are present.
    #[default]
    Auto,
    /// Model will not call any tool.
    None,
    /// Model must call one or more tools.
    Required,
}

impl ToolChoiceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::None => "none",
            Self::Required => "required",
        }
    }
}

impl std::str::FromStr for ToolChoiceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "none" => Ok(Self::None),
            "required" => Ok(Self::Required),
            _ => Err(format!(
                "unknown tool_choice: {} (use auto, none, or required)",
                s
            )),
        }
    }
}

/// Token usage for one LLM call (prompt + completion).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    /// Tokens in the prompt (input).
    pub prompt_tokens: u32,
    /// Tokens in the completion (output).
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

/// Response from an LLM completion: assistant message text and optional tool calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LlmResponse {
    /// Assistant message content (plain text; may be empty when tools are called).
    pub content: String,
    /// Tool calls from this turn; empty means a plain reply.
    pub tool_calls: Vec<ToolCall>,
    /// Token usage for this call, when the backend reports it.
    pub usage: Option<LlmUsage>,
}

impl LlmResponse {
    /// A plain text reply.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// A reply that requests tool calls.
    pub fn with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
            usage: None,
        }
    }

    /// The assistant message to append to the history.
    pub fn into_message(self) -> Message {
        Message::assistant_with_tool_calls(self.content, self.tool_calls)
    }
}

/// LLM client: given messages, returns assistant text and optional tool calls.
///
/// Implementations: [`MockLlm`] (scripted responses), [`ChatOpenAI`] (real API).
/// Calls block the current thread until the reply arrives.
pub trait LlmClient: Send + Sync {
    /// Invoke one turn: read messages, return assistant content and optional tool calls.
    fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;
}
