//! stream(): one step per executed node, snapshots after each merge.

use skein::{MessagesState, RunConfig, RunError, StateGraph, END, START};

use crate::common::{always_fails, echo};

fn three_echoes() -> StateGraph<MessagesState> {
    let mut graph = StateGraph::<MessagesState>::new();
    for id in ["a", "b", "c"] {
        graph.add_node(id, echo).unwrap();
    }
    graph.add_edge(START, "a").unwrap();
    graph.add_edge("a", "b").unwrap();
    graph.add_edge("b", "c").unwrap();
    graph.add_edge("c", END).unwrap();
    graph
}

/// **Scenario**: append-only messages grow monotonically across steps, each step a prefix-extension of the last.
#[test]
fn messages_grow_monotonically() {
    let compiled = three_echoes().compile().unwrap();
    let steps: Vec<_> = compiled
        .stream(MessagesState::from_user("hi"))
        .collect::<Result<_, _>>()
        .unwrap();

    let nodes: Vec<&str> = steps.iter().map(|s| s.node.as_str()).collect();
    assert_eq!(nodes, vec!["a", "b", "c"]);

    let mut previous = MessagesState::from_user("hi").messages;
    for step in &steps {
        let current = &step.state.messages;
        assert_eq!(current.len(), previous.len() + 1);
        assert_eq!(&current[..previous.len()], &previous[..]);
        previous = current.clone();
    }

    let final_state = compiled.invoke(MessagesState::from_user("hi")).unwrap();
    assert_eq!(steps.last().unwrap().state, final_state);
}

/// **Scenario**: after an error the stream yields nothing more.
#[test]
fn stream_ends_after_error() {
    let mut graph = StateGraph::<MessagesState>::new();
    graph.add_node("a", echo).unwrap();
    graph.add_node("boom", always_fails).unwrap();
    graph.add_edge(START, "a").unwrap();
    graph.add_edge("a", "boom").unwrap();
    graph.add_edge("boom", END).unwrap();
    let compiled = graph.compile().unwrap();

    let mut steps = compiled.stream(MessagesState::from_user("hi"));
    assert_eq!(steps.next().unwrap().unwrap().node, "a");
    assert!(matches!(steps.next(), Some(Err(RunError::NodeExecution { .. }))));
    assert!(steps.next().is_none());
}

/// **Scenario**: a step limit applies to streams too.
#[test]
fn stream_respects_recursion_limit() {
    let compiled = three_echoes().compile().unwrap();
    let items: Vec<_> = compiled
        .stream_with_config(MessagesState::from_user("hi"), &RunConfig::with_recursion_limit(2))
        .collect();
    assert_eq!(items.len(), 3);
    assert!(items[0].is_ok() && items[1].is_ok());
    assert!(matches!(items[2], Err(RunError::RecursionLimit { limit: 2, .. })));
}
