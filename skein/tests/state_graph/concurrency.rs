//! One compiled graph, many threads.

use std::sync::Arc;
use std::thread;

use skein::{Message, MessagesState, StateGraph, END, START};

use crate::common::echo;

/// **Scenario**: concurrent invocations from several threads give independent results.
#[test]
fn concurrent_invocations_are_independent() {
    let mut graph = StateGraph::<MessagesState>::new();
    graph.add_node("first", echo).unwrap();
    graph.add_node("second", echo).unwrap();
    graph.add_edge(START, "first").unwrap();
    graph.add_edge("first", "second").unwrap();
    graph.add_edge("second", END).unwrap();
    let compiled = graph.compile().unwrap();

    let results: Vec<MessagesState> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let compiled = &compiled;
                scope.spawn(move || compiled.invoke(MessagesState::from_user(format!("msg-{i}"))))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect()
    });

    for (i, state) in results.iter().enumerate() {
        let text = format!("msg-{i}");
        assert_eq!(
            state.messages,
            vec![
                Message::user(text.clone()),
                Message::assistant(text.clone()),
                Message::assistant(text)
            ]
        );
    }
}

/// **Scenario**: a cloned compiled graph can move to another thread.
#[test]
fn cloned_graph_moves_across_threads() {
    let mut graph = StateGraph::<MessagesState>::new();
    graph.add_node("echo", echo).unwrap();
    graph.add_edge(START, "echo").unwrap();
    graph.add_edge("echo", END).unwrap();
    let compiled = Arc::new(graph.compile().unwrap());

    let worker = {
        let compiled = Arc::clone(&compiled);
        thread::spawn(move || compiled.invoke(MessagesState::from_user("x")).unwrap())
    };
    let cloned = (*compiled).clone();
    let here = cloned.invoke(MessagesState::from_user("x")).unwrap();
    assert_eq!(worker.join().unwrap(), here);
}
