//! Conditional routing at run time: mapped keys, direct node ids and unknown keys.

use std::collections::HashMap;

use skein::{Message, MessagesState, RunError, StateGraph, END, START};

use crate::common::{echo, CountingNode};

fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// **Scenario**: a router key absent from its mapping yields Routing, and no node after the router's source runs.
#[test]
fn unknown_key_is_routing_error_and_nothing_else_runs() {
    let after = CountingNode::default();
    let mut graph = StateGraph::<MessagesState>::new();
    graph.add_node("decide", echo).unwrap();
    graph.add_node("after", after.clone()).unwrap();
    graph.add_edge(START, "decide").unwrap();
    graph
        .add_conditional_edges(
            "decide",
            |_s: &MessagesState| "maybe".to_string(),
            Some(map(&[("yes", "after"), ("no", END)])),
        )
        .unwrap();
    graph.add_edge("after", END).unwrap();
    let compiled = graph.compile().unwrap();

    let err = compiled.invoke(MessagesState::from_user("hi")).unwrap_err();
    match &err {
        RunError::Routing { node, key, state } => {
            assert_eq!(node, "decide");
            assert_eq!(key, "maybe");
            assert_eq!(state.messages.len(), 2, "state includes the source's update");
        }
        other => panic!("expected Routing, got {:?}", other),
    }
    assert_eq!(after.count(), 0);
}

/// **Scenario**: a mapped key routes to its destination.
#[test]
fn mapped_key_routes_to_destination() {
    let after = CountingNode::default();
    let mut graph = StateGraph::<MessagesState>::new();
    graph.add_node("decide", echo).unwrap();
    graph.add_node("after", after.clone()).unwrap();
    graph.add_edge(START, "decide").unwrap();
    graph
        .add_conditional_edges(
            "decide",
            |s: &MessagesState| {
                if s.messages.iter().any(|m| m.content() == "go") {
                    "yes".to_string()
                } else {
                    "no".to_string()
                }
            },
            Some(map(&[("yes", "after"), ("no", END)])),
        )
        .unwrap();
    graph.add_edge("after", END).unwrap();
    let compiled = graph.compile().unwrap();

    compiled.invoke(MessagesState::from_user("stay")).unwrap();
    assert_eq!(after.count(), 0);
    let out = compiled.invoke(MessagesState::from_user("go")).unwrap();
    assert_eq!(after.count(), 1);
    assert_eq!(
        out.messages,
        vec![Message::user("go"), Message::assistant("go")]
    );
}

/// **Scenario**: without a mapping, a key that is not a node or END is a Routing error.
#[test]
fn unmapped_router_rejects_unknown_node_id() {
    let mut graph = StateGraph::<MessagesState>::new();
    graph.add_node("decide", echo).unwrap();
    graph.add_edge(START, "decide").unwrap();
    graph
        .add_conditional_edges("decide", |_s: &MessagesState| "nowhere".to_string(), None)
        .unwrap();
    let compiled = graph.compile().unwrap();
    let err = compiled.invoke(MessagesState::from_user("hi")).unwrap_err();
    assert!(matches!(err, RunError::Routing { ref key, .. } if key == "nowhere"));
    assert_eq!(err.node(), Some("decide"));
}
