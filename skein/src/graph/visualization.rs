//! Graph visualization utilities.
//!
//! Renders a compiled graph as Mermaid, Graphviz DOT or plain text, for docs and
//! debugging. Pure string functions; nothing here takes part in execution.
//!
//! Fixed edges are drawn solid. Router edges are drawn dashed and labelled with
//! their key; a dynamic router without a path map has no known targets and is drawn
//! as a dashed edge to `?`.

use std::fmt::Write;

use crate::state::State;

use super::{CompiledStateGraph, NextEntry, END, START};

/// One outgoing edge for drawing: target, and the router key when conditional.
struct DrawnEdge {
    from: String,
    to: String,
    label: Option<String>,
}

fn drawn_edges<S: State>(graph: &CompiledStateGraph<S>) -> Vec<DrawnEdge> {
    let mut edges = vec![DrawnEdge {
        from: START.to_string(),
        to: graph.entry().to_string(),
        label: None,
    }];
    for id in graph.node_ids() {
        match graph.next_entry(id) {
            Some(NextEntry::Unconditional(to)) => edges.push(DrawnEdge {
                from: id.to_string(),
                to: to.clone(),
                label: None,
            }),
            Some(NextEntry::Conditional(router)) => {
                match router.known_edges(|target| graph.is_node(target)) {
                    Some(known) => edges.extend(known.into_iter().map(|(key, to)| DrawnEdge {
                        from: id.to_string(),
                        to,
                        label: Some(key),
                    })),
                    None => edges.push(DrawnEdge {
                        from: id.to_string(),
                        to: "?".to_string(),
                        label: Some("dynamic".to_string()),
                    }),
                }
            }
            None => {}
        }
    }
    edges
}

/// Generate a Mermaid flowchart of the graph.
///
/// ```text
/// flowchart TD
///     __start__([__start__])
///     call_llm[call_llm]
///     __end__([__end__])
///     __start__ --> call_llm
///     call_llm --> __end__
/// ```
pub fn generate_mermaid<S: State>(graph: &CompiledStateGraph<S>) -> String {
    let mut out = String::from("flowchart TD\n");
    let _ = writeln!(out, "    {0}([{0}])", START);
    for id in graph.node_ids() {
        let _ = writeln!(out, "    {0}[{0}]", id);
    }
    let _ = writeln!(out, "    {0}([{0}])", END);
    for edge in drawn_edges(graph) {
        let _ = match &edge.label {
            None => writeln!(out, "    {} --> {}", edge.from, edge.to),
            Some(label) => writeln!(
                out,
                "    {} -. {} .-> {}",
                edge.from,
                label,
                mermaid_id(&edge.to)
            ),
        };
    }
    out
}

fn mermaid_id(id: &str) -> &str {
    if id == "?" {
        "dynamic_target"
    } else {
        id
    }
}

/// Generate Graphviz DOT format representation of the graph.
pub fn generate_dot<S: State>(graph: &CompiledStateGraph<S>) -> String {
    let mut dot = String::from("digraph {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=box];\n\n");
    let _ = writeln!(
        dot,
        "  \"{}\" [label=\"START\", style=bold, fillcolor=lightgreen];",
        START
    );
    let _ = writeln!(
        dot,
        "  \"{}\" [label=\"END\", style=bold, fillcolor=lightcoral];",
        END
    );
    for id in graph.node_ids() {
        let _ = writeln!(dot, "  \"{}\";", id);
    }
    dot.push('\n');
    for edge in drawn_edges(graph) {
        let _ = match &edge.label {
            None => writeln!(dot, "  \"{}\" -> \"{}\";", edge.from, edge.to),
            Some(label) => writeln!(
                dot,
                "  \"{}\" -> \"{}\" [style=dashed, label=\"{}\"];",
                edge.from, edge.to, label
            ),
        };
    }
    dot.push_str("}\n");
    dot
}

/// Generate a simple text representation of the graph structure.
pub fn generate_text<S: State>(graph: &CompiledStateGraph<S>) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Graph Structure:");
    let _ = writeln!(text, "Nodes: {}", graph.node_ids().count());
    let _ = writeln!(text, "Entry: {}", graph.entry());
    let _ = writeln!(text, "\nEdges:");
    for edge in drawn_edges(graph) {
        let _ = match &edge.label {
            None => writeln!(text, "  {} -> {}", edge.from, edge.to),
            Some(label) => writeln!(text, "  {} -[{}]-> {}", edge.from, label, edge.to),
        };
    }
    text
}
