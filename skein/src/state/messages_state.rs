//! Prebuilt message state: a single append-only `messages` field.

use serde::{Deserialize, Serialize};

use crate::channels::{self, Topic};
use crate::message::Message;

use super::{HasMessages, State};

/// Conversation state with one append-only field.
///
/// Nodes return [`MessagesUpdate`]; the runner appends its messages through the
/// [`Topic`] channel, so the history only grows and keeps order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagesState {
    pub messages: Vec<Message>,
}

impl MessagesState {
    /// State holding `messages` as the initial history.
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// State with a single user message.
    pub fn from_user(content: impl Into<String>) -> Self {
        Self::new(vec![Message::user(content)])
    }
}

/// Partial update for [`MessagesState`]: messages to append.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessagesUpdate {
    pub messages: Option<Vec<Message>>,
}

impl MessagesUpdate {
    /// Update that appends `messages`.
    pub fn append(messages: Vec<Message>) -> Self {
        Self {
            messages: Some(messages),
        }
    }
}

impl State for MessagesState {
    type Update = MessagesUpdate;

    fn apply(&mut self, update: MessagesUpdate) {
        channels::apply::<Topic, _>(&mut self.messages, update.messages);
    }
}

impl HasMessages for MessagesState {
    fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn append_messages(messages: Vec<Message>) -> MessagesUpdate {
        MessagesUpdate::append(messages)
    }
}
