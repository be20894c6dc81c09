//! # Skein
//!
//! A small, synchronous state-graph engine. Build workflows with a **state-in,
//! partial-update-out** design: one typed state flows through named nodes, each node
//! returns only the fields it changes, and edges (fixed or conditional) pick the
//! next node until END.
//!
//! ## Design principles
//!
//! - **Typed partial updates**: each state names an `Update` record; per-field
//!   channels ([`LastValue`], [`Topic`]) decide how updates are merged.
//! - **Validated up front**: [`StateGraph::compile`] reports every structural defect
//!   at once; typed routers ([`Branch`]) are checked there too.
//! - **Synchronous, shareable**: [`CompiledStateGraph::invoke`] runs on the caller's
//!   thread; a compiled graph is `Send + Sync` and can serve concurrent invocations.
//! - **Explicit configuration**: credentials reach [`ChatOpenAI`] through a settings
//!   value, never through process-wide environment writes.
//!
//! ## Main modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`Branch`],
//!   [`RunConfig`], visualization ([`generate_mermaid`], [`generate_dot`], [`generate_text`]).
//! - [`state`]: [`State`], [`HasMessages`], [`MessagesState`].
//! - [`channels`]: [`Channel`], [`LastValue`], [`Topic`].
//! - [`message`]: [`Message`] (System / User / Assistant / Tool), [`ToolCall`].
//! - [`llm`]: [`LlmClient`] trait, [`MockLlm`], [`ChatOpenAI`].
//! - [`tool_source`]: [`ToolSource`], [`ToolSpec`], [`FnToolSource`].
//! - [`agent`]: [`ChatNode`], [`ToolNode`], [`tools_condition`].
//!
//! Key types are re-exported at crate root: `use skein::{StateGraph, START, END, Message};`.
//!
//! ## Quick start
//!
//! ```rust
//! use skein::channels::{self, LastValue};
//! use skein::{AgentError, State, StateGraph, END, START};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Greeting {
//!     text: String,
//! }
//!
//! #[derive(Debug, Default)]
//! struct GreetingUpdate {
//!     text: Option<String>,
//! }
//!
//! impl State for Greeting {
//!     type Update = GreetingUpdate;
//!
//!     fn apply(&mut self, update: GreetingUpdate) {
//!         channels::apply::<LastValue, _>(&mut self.text, update.text);
//!     }
//! }
//!
//! fn shout(state: &Greeting) -> Result<GreetingUpdate, AgentError> {
//!     Ok(GreetingUpdate {
//!         text: Some(state.text.to_uppercase()),
//!     })
//! }
//!
//! let mut graph = StateGraph::<Greeting>::new();
//! graph
//!     .add_node("shout", shout)?
//!     .add_edge(START, "shout")?
//!     .add_edge("shout", END)?;
//! let out = graph.compile()?.invoke(Greeting { text: "hi".into() })?;
//! assert_eq!(out.text, "HI");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod agent;
pub mod channels;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod state;
pub mod tool_source;

pub use agent::{
    has_pending_tool_call, tools_condition, ChatNode, HandleToolErrors, ToolNode,
    ToolsConditionResult,
};
pub use channels::{Channel, LastValue, Topic};
pub use error::AgentError;
pub use graph::{
    generate_dot, generate_mermaid, generate_text, BuildError, Branch, CompilationError,
    CompiledStateGraph, Defect, Node, RunConfig, RunError, StateGraph, Step, END, START,
};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, MockLlm, OpenAIConfig};
pub use message::{Message, ToolCall};
pub use state::{HasMessages, MessagesState, MessagesUpdate, State};
pub use tool_source::{FnToolSource, ToolCallContent, ToolSource, ToolSourceError, ToolSpec};
