//! Chat node: one language-model call.
//!
//! Sends the whole message history (after an optional system prompt) to the
//! `LlmClient` and appends the single reply. The reply may carry tool calls, which
//! `tools_condition` then routes to the tool node.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::HasMessages;

/// Language-model call node.
#[derive(Clone)]
pub struct ChatNode {
    llm: Arc<dyn LlmClient>,
    system_prompt: Option<String>,
}

impl ChatNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            system_prompt: None,
        }
    }

    /// Prepends a system message to every request. The prompt is not written
    /// into the state.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

impl fmt::Debug for ChatNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatNode")
            .field("system_prompt", &self.system_prompt)
            .finish_non_exhaustive()
    }
}

impl<S: HasMessages> Node<S> for ChatNode {
    fn run(&self, state: &S) -> Result<S::Update, AgentError> {
        let history = state.messages();
        let response = match &self.system_prompt {
            Some(prompt) => {
                let mut request = Vec::with_capacity(history.len() + 1);
                request.push(Message::system(prompt.clone()));
                request.extend_from_slice(history);
                self.llm.invoke(&request)?
            }
            None => self.llm.invoke(history)?,
        };
        debug!(
            content_len = response.content.len(),
            tool_calls = response.tool_calls.len(),
            "LLM replied"
        );
        Ok(S::append_messages(vec![response.into_message()]))
    }
}
