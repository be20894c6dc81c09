//! Graph state and typed partial updates.
//!
//! Every graph runs over one state type `S: State`. Nodes read `&S` and return
//! `S::Update`, a record naming only the fields they change; the runner folds it
//! in with [`State::apply`], which picks a [`Channel`](crate::channels::Channel)
//! per field.
//!
//! # Main types
//!
//! - [`State`]: the state contract (update type + merge).
//! - [`HasMessages`]: states that carry a message history; used by the prebuilt
//!   [`ChatNode`](crate::agent::ChatNode), [`ToolNode`](crate::agent::ToolNode) and
//!   [`tools_condition`](crate::agent::tools_condition).
//! - [`MessagesState`] / [`MessagesUpdate`]: the prebuilt append-only message state.
//!
//! # Example
//!
//! ```rust
//! use skein::channels::{self, LastValue};
//! use skein::State;
//!
//! #[derive(Clone, Debug, Default)]
//! struct MoodState {
//!     graph_state: String,
//! }
//!
//! #[derive(Debug, Default)]
//! struct MoodUpdate {
//!     graph_state: Option<String>,
//! }
//!
//! impl State for MoodState {
//!     type Update = MoodUpdate;
//!
//!     fn apply(&mut self, update: MoodUpdate) {
//!         channels::apply::<LastValue, _>(&mut self.graph_state, update.graph_state);
//!     }
//! }
//! ```

mod messages_state;

pub use messages_state::{MessagesState, MessagesUpdate};

use std::fmt::Debug;

use crate::message::Message;

/// State flowing through a graph.
///
/// `Clone` is needed for step snapshots ([`CompiledStateGraph::stream`](crate::graph::CompiledStateGraph::stream));
/// `Send + Sync` lets one compiled graph be shared across threads.
pub trait State: Clone + Send + Sync + Debug + 'static {
    /// Partial update returned by nodes. `Default` is the empty update.
    type Update: Default + Send + Debug + 'static;

    /// Folds `update` into `self`, field by field.
    fn apply(&mut self, update: Self::Update);
}

/// A state with an ordered, append-only message history.
pub trait HasMessages: State {
    /// Message history, oldest first.
    fn messages(&self) -> &[Message];

    /// Builds an update that appends `messages` and changes nothing else.
    fn append_messages(messages: Vec<Message>) -> Self::Update;

    /// Most recent message, if any.
    fn last_message(&self) -> Option<&Message> {
        self.messages().last()
    }
}
