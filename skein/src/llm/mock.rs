//! Mock LLM for tests and examples.
//!
//! Scripted replies with no network: a fixed response, a sequence (one per call,
//! last one repeated), a function of the incoming messages, or a failure.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::{Message, ToolCall};

type Responder = Arc<dyn Fn(&[Message]) -> LlmResponse + Send + Sync>;

enum Script {
    Fixed(LlmResponse),
    Sequence(Vec<LlmResponse>),
    Respond(Responder),
    Fail(String),
}

/// Mock LLM: scripted assistant replies, with a call counter.
///
/// ```rust
/// use skein::llm::{LlmClient, MockLlm};
/// use skein::Message;
///
/// let llm = MockLlm::with_no_tool_calls("Hi!");
/// let reply = llm.invoke(&[Message::user("Hello there!")]).unwrap();
/// assert_eq!(reply.content, "Hi!");
/// assert_eq!(llm.call_count(), 1);
/// ```
pub struct MockLlm {
    script: Script,
    calls: AtomicUsize,
}

impl MockLlm {
    /// Mock with custom content and tool calls, returned on every call.
    pub fn new(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::from_script(Script::Fixed(LlmResponse::with_tool_calls(content, tool_calls)))
    }

    /// Mock that returns assistant text and no tool calls.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self::from_script(Script::Fixed(LlmResponse::text(content)))
    }

    /// Mock that returns `responses` in order; the last one repeats once exhausted.
    /// An empty list behaves like an empty text reply.
    pub fn sequence(responses: Vec<LlmResponse>) -> Self {
        Self::from_script(Script::Sequence(responses))
    }

    /// Mock that computes each reply from the incoming messages.
    pub fn responding<F>(respond: F) -> Self
    where
        F: Fn(&[Message]) -> LlmResponse + Send + Sync + 'static,
    {
        Self::from_script(Script::Respond(Arc::new(respond)))
    }

    /// Mock whose every call fails with `AgentError::Llm(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_script(Script::Fail(message.into()))
    }

    /// Number of `invoke` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn from_script(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }
}

impl fmt::Debug for MockLlm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.script {
            Script::Fixed(_) => "fixed",
            Script::Sequence(_) => "sequence",
            Script::Respond(_) => "responding",
            Script::Fail(_) => "failing",
        };
        f.debug_struct("MockLlm")
            .field("script", &kind)
            .field("calls", &self.call_count())
            .finish()
    }
}

impl LlmClient for MockLlm {
    fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Fixed(response) => Ok(response.clone()),
            Script::Sequence(responses) => Ok(responses
                .get(n)
                .or_else(|| responses.last())
                .cloned()
                .unwrap_or_default()),
            Script::Respond(respond) => Ok(respond(messages)),
            Script::Fail(message) => Err(AgentError::Llm(message.clone())),
        }
    }
}
