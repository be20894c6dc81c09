//! Shared states and nodes for StateGraph integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use skein::channels::{self, LastValue};
use skein::{AgentError, Branch, Message, MessagesState, MessagesUpdate, State};

/// The mood example state: one overwrite field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoodState {
    pub graph_state: String,
}

#[derive(Debug, Default)]
pub struct MoodUpdate {
    pub graph_state: Option<String>,
}

impl State for MoodState {
    type Update = MoodUpdate;

    fn apply(&mut self, update: MoodUpdate) {
        channels::apply::<LastValue, _>(&mut self.graph_state, update.graph_state);
    }
}

impl MoodState {
    pub fn new(text: &str) -> Self {
        Self {
            graph_state: text.to_string(),
        }
    }
}

fn append(state: &MoodState, suffix: &str) -> MoodUpdate {
    MoodUpdate {
        graph_state: Some(format!("{}{}", state.graph_state, suffix)),
    }
}

pub fn node_1(state: &MoodState) -> Result<MoodUpdate, AgentError> {
    Ok(append(state, " I am"))
}

pub fn node_2(state: &MoodState) -> Result<MoodUpdate, AgentError> {
    Ok(append(state, " happy!"))
}

pub fn node_3(state: &MoodState) -> Result<MoodUpdate, AgentError> {
    Ok(append(state, " sad!"))
}

/// Routing outcome of the mood graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Sad,
}

impl Branch for Mood {
    const ALL: &'static [Self] = &[Mood::Happy, Mood::Sad];

    fn key(&self) -> &'static str {
        match self {
            Mood::Happy => "node_2",
            Mood::Sad => "node_3",
        }
    }
}

/// Appends an assistant message echoing the last message's content.
pub fn echo(state: &MessagesState) -> Result<MessagesUpdate, AgentError> {
    let last = state
        .messages
        .last()
        .map(|m| m.content().to_string())
        .unwrap_or_default();
    Ok(MessagesUpdate::append(vec![Message::assistant(last)]))
}

pub fn always_fails(_state: &MessagesState) -> Result<MessagesUpdate, AgentError> {
    Err(AgentError::failed("always fails"))
}

/// Node that counts its runs and appends nothing.
#[derive(Clone, Default)]
pub struct CountingNode {
    pub runs: Arc<AtomicUsize>,
}

impl CountingNode {
    pub fn count(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl skein::Node<MessagesState> for CountingNode {
    fn run(&self, _state: &MessagesState) -> Result<MessagesUpdate, AgentError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(MessagesUpdate::default())
    }
}
