//! StateGraph invoke: the mood scenario, single-node chain and loops.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use skein::channels::{self, LastValue};
use skein::{AgentError, Message, MessagesState, State, StateGraph, END, START};

use crate::common::{echo, node_1, node_2, node_3, Mood, MoodState};

fn mood_graph(
    pick: impl Fn(&MoodState) -> Mood + Send + Sync + 'static,
) -> skein::CompiledStateGraph<MoodState> {
    let mut graph = StateGraph::<MoodState>::new();
    graph
        .add_node("node_1", node_1)
        .unwrap()
        .add_node("node_2", node_2)
        .unwrap()
        .add_node("node_3", node_3)
        .unwrap()
        .add_edge(START, "node_1")
        .unwrap()
        .add_branch("node_1", pick, None)
        .unwrap()
        .add_edge("node_2", END)
        .unwrap()
        .add_edge("node_3", END)
        .unwrap();
    graph.compile().unwrap()
}

/// **Scenario**: "Hi" ends as "Hi I am happy!" or "Hi I am sad!", never both.
#[test]
fn mood_scenario_ends_happy_or_sad() {
    let flips = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&flips);
    let graph = mood_graph(move |_s| {
        if counter.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
            Mood::Happy
        } else {
            Mood::Sad
        }
    });

    let mut seen = Vec::new();
    for _ in 0..4 {
        let out = graph.invoke(MoodState::new("Hi")).unwrap();
        assert!(
            out.graph_state == "Hi I am happy!" || out.graph_state == "Hi I am sad!",
            "unexpected final state: {:?}",
            out
        );
        assert!(!(out.graph_state.contains("happy") && out.graph_state.contains("sad")));
        seen.push(out.graph_state);
    }
    assert!(seen.contains(&"Hi I am happy!".to_string()));
    assert!(seen.contains(&"Hi I am sad!".to_string()));
    assert_eq!(flips.load(Ordering::SeqCst), 4);
}

/// **Scenario**: a single-node chain appending one message ends with two messages, original first.
#[test]
fn single_node_chain_appends_after_original() {
    let mut graph = StateGraph::<MessagesState>::new();
    graph
        .add_node("echo", echo)
        .unwrap()
        .add_edge(START, "echo")
        .unwrap()
        .add_edge("echo", END)
        .unwrap();
    let compiled = graph.compile().unwrap();

    let out = compiled.invoke(MessagesState::from_user("hi")).unwrap();
    assert_eq!(out.messages, vec![Message::user("hi"), Message::assistant("hi")]);
}

/// Counter state for loop tests.
#[derive(Debug, Clone, Default)]
struct Counter {
    value: u32,
}

#[derive(Debug, Default)]
struct CounterUpdate {
    value: Option<u32>,
}

impl State for Counter {
    type Update = CounterUpdate;

    fn apply(&mut self, update: CounterUpdate) {
        channels::apply::<LastValue, _>(&mut self.value, update.value);
    }
}

fn increment(state: &Counter) -> Result<CounterUpdate, AgentError> {
    Ok(CounterUpdate {
        value: Some(state.value + 1),
    })
}

/// **Scenario**: a cycle with an exit compiles and loops until the router sends it to END.
#[test]
fn loop_runs_until_router_exits() {
    let mut graph = StateGraph::<Counter>::new();
    graph.add_node("increment", increment).unwrap();
    graph.add_edge(START, "increment").unwrap();
    graph
        .add_conditional_edges(
            "increment",
            |s: &Counter| {
                if s.value < 5 {
                    "increment".to_string()
                } else {
                    END.to_string()
                }
            },
            None,
        )
        .unwrap();
    let compiled = graph.compile().unwrap();
    assert_eq!(compiled.invoke(Counter::default()).unwrap().value, 5);
    assert_eq!(compiled.invoke(Counter { value: 10 }).unwrap().value, 11);
}

/// **Scenario**: invocations are independent; running twice from the same input gives the same result.
#[test]
fn invocations_are_independent() {
    let graph = mood_graph(|s: &MoodState| {
        if s.graph_state.starts_with("Hi") {
            Mood::Happy
        } else {
            Mood::Sad
        }
    });
    let a = graph.invoke(MoodState::new("Hi")).unwrap();
    let b = graph.invoke(MoodState::new("Hi")).unwrap();
    let c = graph.invoke(MoodState::new("Bye")).unwrap();
    assert_eq!(a, b);
    assert_eq!(c.graph_state, "Bye I am sad!");
}
