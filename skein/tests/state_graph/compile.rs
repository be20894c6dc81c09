//! StateGraph build and compile validation.

use std::collections::HashMap;

use skein::{BuildError, Branch, Defect, MessagesState, StateGraph, END, START};

use crate::common::{echo, node_1, node_2, CountingNode, Mood, MoodState};

/// **Scenario**: registering a duplicate node name fails and leaves the node set unchanged.
#[test]
fn duplicate_node_is_rejected_and_graph_unchanged() {
    let mut graph = StateGraph::<MessagesState>::new();
    graph.add_node("echo", echo).unwrap();
    let spare = CountingNode::default();
    let err = graph.add_node("echo", spare.clone()).err();
    assert_eq!(err, Some(BuildError::DuplicateNode("echo".to_string())));

    graph.add_edge(START, "echo").unwrap().add_edge("echo", END).unwrap();
    let compiled = graph.compile().unwrap();
    assert_eq!(compiled.node_ids().collect::<Vec<_>>(), vec!["echo"]);
    let out = compiled.invoke(MessagesState::from_user("hi")).unwrap();
    assert_eq!(out.messages.len(), 2);
    assert_eq!(spare.count(), 0);
}

/// **Scenario**: an edge to an unregistered node is rejected before any node executes.
#[test]
fn edge_to_unknown_node_is_rejected() {
    let counter = CountingNode::default();
    let mut graph = StateGraph::<MessagesState>::new();
    graph.add_node("a", counter.clone()).unwrap();
    graph.add_edge(START, "a").unwrap();
    assert_eq!(
        graph.add_edge("a", "b").err(),
        Some(BuildError::UnknownNode("b".to_string()))
    );
    assert_eq!(
        graph.add_edge("ghost", "a").err(),
        Some(BuildError::UnknownNode("ghost".to_string()))
    );
    assert!(graph.compile().is_err());
    assert_eq!(counter.count(), 0);
}

/// **Scenario**: a graph with no START edge fails to compile with MissingEntry.
#[test]
fn missing_entry_fails_compile() {
    let mut graph = StateGraph::<MessagesState>::new();
    graph.add_node("echo", echo).unwrap();
    graph.add_edge("echo", END).unwrap();
    let err = graph.compile().err().unwrap();
    assert!(err.contains(&Defect::MissingEntry));
    assert!(err.contains(&Defect::Unreachable("echo".to_string())));
}

/// **Scenario**: a node with both a fixed edge and a router has more than one outgoing declaration.
#[test]
fn edge_plus_router_is_multiple_outgoing() {
    let mut graph = StateGraph::<MoodState>::new();
    graph.add_node("node_1", node_1).unwrap();
    graph.add_edge(START, "node_1").unwrap();
    graph.add_edge("node_1", END).unwrap();
    graph
        .add_conditional_edges("node_1", |_s: &MoodState| END.to_string(), None)
        .unwrap();
    let err = graph.compile().err().unwrap();
    assert_eq!(err.defects, vec![Defect::MultipleOutgoing("node_1".to_string())]);
}

/// Typed router whose `Later` variant names a node nobody registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Now,
    Later,
}

impl Branch for Step {
    const ALL: &'static [Self] = &[Step::Now, Step::Later];

    fn key(&self) -> &'static str {
        match self {
            Step::Now => "node_2",
            Step::Later => "node_4",
        }
    }
}

/// **Scenario**: typed branches with an unresolvable variant fail at compile time, even if never taken.
#[test]
fn typed_branch_with_unknown_variant_fails_compile() {
    let mut graph = StateGraph::<MoodState>::new();
    graph.add_node("node_1", node_1).unwrap();
    graph.add_node("node_2", node_2).unwrap();
    graph.add_edge(START, "node_1").unwrap();
    graph.add_branch("node_1", |_s: &MoodState| Step::Now, None).unwrap();
    graph.add_edge("node_2", END).unwrap();
    let err = graph.compile().err().unwrap();
    assert_eq!(
        err.defects,
        vec![Defect::UnknownTarget {
            from: "node_1".to_string(),
            to: "node_4".to_string()
        }]
    );
}

/// **Scenario**: a typed branch key missing from its path map is an unknown target.
#[test]
fn typed_branch_key_missing_from_map_fails_compile() {
    let mut graph = StateGraph::<MoodState>::new();
    graph.add_node("node_1", node_1).unwrap();
    graph.add_node("node_2", node_2).unwrap();
    graph.add_edge(START, "node_1").unwrap();
    let map: HashMap<String, String> = [("node_2".to_string(), "node_2".to_string())]
        .into_iter()
        .collect();
    graph
        .add_branch("node_1", |_s: &MoodState| Mood::Happy, Some(map))
        .unwrap();
    graph.add_edge("node_2", END).unwrap();
    let err = graph.compile().err().unwrap();
    assert_eq!(
        err.defects,
        vec![Defect::UnknownTarget {
            from: "node_1".to_string(),
            to: "node_3".to_string()
        }]
    );
    assert!(err.to_string().contains("node_3"));
}

/// **Scenario**: START wired straight to END has no node to run, so compile rejects it
/// instead of handing back a graph that can only fail.
#[test]
fn start_to_end_without_nodes_fails_compile() {
    let mut graph = StateGraph::<MessagesState>::new();
    graph.add_edge(START, END).unwrap();
    let err = graph.compile().err().unwrap();
    assert_eq!(err.defects, vec![Defect::EntryIsEnd]);
    assert!(err.to_string().contains("START leads directly to END"));
}
