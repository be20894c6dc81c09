//! The mood graph: node_1, then node_2 ("happy") or node_3 ("sad"), then END.
//!
//! The state is one overwrite field; every node appends a phrase to it. The router
//! returns a [`Mood`], so both destinations are checked when the graph compiles.

use skein::channels::{self, LastValue};
use skein::{AgentError, Branch, CompiledStateGraph, State, StateGraph, END, START};

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

/// Where the router sends the run after node_1.
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

fn append(state: &MoodState, phrase: &str) -> MoodUpdate {
    MoodUpdate {
        graph_state: Some(format!("{}{}", state.graph_state, phrase)),
    }
}

fn node_1(state: &MoodState) -> Result<MoodUpdate, AgentError> {
    println!("---Node 1---");
    Ok(append(state, " I am"))
}

fn node_2(state: &MoodState) -> Result<MoodUpdate, AgentError> {
    println!("---Node 2---");
    Ok(append(state, " happy!"))
}

fn node_3(state: &MoodState) -> Result<MoodUpdate, AgentError> {
    println!("---Node 3---");
    Ok(append(state, " sad!"))
}

/// Builds and compiles the mood graph with `decide_mood` as the router after node_1.
pub fn mood_graph<F>(
    decide_mood: F,
) -> Result<CompiledStateGraph<MoodState>, Box<dyn std::error::Error>>
where
    F: Fn(&MoodState) -> Mood + Send + Sync + 'static,
{
    let mut graph = StateGraph::<MoodState>::new();
    graph
        .add_node("node_1", node_1)?
        .add_node("node_2", node_2)?
        .add_node("node_3", node_3)?
        .add_edge(START, "node_1")?
        .add_branch("node_1", decide_mood, None)?
        .add_edge("node_2", END)?
        .add_edge("node_3", END)?;
    Ok(graph.compile()?)
}
