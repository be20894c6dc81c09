//! Router: START → tool_calling_llm → (tools | END), tools → END.
//!
//! `tools_condition` sends the state to the tool node when the model's reply carries
//! a tool call; the tool node appends one tool message per call.
//!
//! Needs `OPENAI_API_KEY` (env, `.env` or `$XDG_CONFIG_HOME/skein/config.toml`).
//!
//! Run: `cargo run -p skein-examples --example router`

use std::sync::Arc;

use env_config::load_settings;
use skein::agent::{tools_condition, ChatNode, ToolNode};
use skein::{generate_text, MessagesState, StateGraph, END, START};
use skein_examples::{build_llm, init_logging, multiply_tools, run_demos, APP_NAME};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(APP_NAME, None)?;
    init_logging(&settings)?;

    let tools = multiply_tools();
    let llm = build_llm(&settings, &tools)?;

    let mut graph = StateGraph::<MessagesState>::new();
    graph
        .add_node("tool_calling_llm", ChatNode::new(llm))?
        .add_node("tools", ToolNode::new(Arc::new(tools)))?
        .add_edge(START, "tool_calling_llm")?
        .add_branch("tool_calling_llm", tools_condition, None)?
        .add_edge("tools", END)?;
    let compiled = graph.compile()?;

    println!("{}", generate_text(&compiled));
    run_demos(&compiled)
}
