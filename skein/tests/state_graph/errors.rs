//! Node failures: the run stops and reports the node and the last good state.

use std::error::Error as _;

use skein::{AgentError, Message, MessagesState, RunError, StateGraph, END, START};

use crate::common::{always_fails, echo, CountingNode};

/// **Scenario**: a failing node yields NodeExecution with its name and the state before it ran.
#[test]
fn node_failure_reports_node_and_state() {
    let after = CountingNode::default();
    let mut graph = StateGraph::<MessagesState>::new();
    graph
        .add_node("echo", echo)
        .unwrap()
        .add_node("boom", always_fails)
        .unwrap()
        .add_node("after", after.clone())
        .unwrap()
        .add_edge(START, "echo")
        .unwrap()
        .add_edge("echo", "boom")
        .unwrap()
        .add_edge("boom", "after")
        .unwrap()
        .add_edge("after", END)
        .unwrap();
    let compiled = graph.compile().unwrap();

    let err = compiled.invoke(MessagesState::from_user("hi")).unwrap_err();
    assert!(err.to_string().contains("boom"), "{}", err);
    assert!(err.source().is_some());
    match err {
        RunError::NodeExecution {
            node,
            source,
            state,
        } => {
            assert_eq!(node, "boom");
            assert!(matches!(source, AgentError::ExecutionFailed(ref m) if m == "always fails"));
            assert_eq!(
                state.messages,
                vec![Message::user("hi"), Message::assistant("hi")]
            );
        }
        other => panic!("expected NodeExecution, got {:?}", other),
    }
    assert_eq!(after.count(), 0);
}

/// **Scenario**: a run error converts into a boxed error for `?` in callers.
#[test]
fn run_error_boxes() {
    fn run() -> Result<MessagesState, Box<dyn std::error::Error>> {
        let mut graph = StateGraph::<MessagesState>::new();
        graph
            .add_node("boom", always_fails)?
            .add_edge(START, "boom")?
            .add_edge("boom", END)?;
        Ok(graph.compile()?.invoke(MessagesState::default())?)
    }
    let err = run().unwrap_err();
    assert!(err.to_string().contains("always fails"));
}
