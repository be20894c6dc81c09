//! Chain: START → tool_calling_llm → END.
//!
//! The model has the `multiply` tool bound but the graph never executes tools; a
//! tool request shows up only as the assistant message's tool calls.
//!
//! Needs `OPENAI_API_KEY` (env, `.env` or `$XDG_CONFIG_HOME/skein/config.toml`).
//!
//! Run: `cargo run -p skein-examples --example chain`

use env_config::load_settings;
use skein::agent::ChatNode;
use skein::{MessagesState, StateGraph, END, START};
use skein_examples::{build_llm, init_logging, multiply_tools, run_demos, APP_NAME};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(APP_NAME, None)?;
    init_logging(&settings)?;

    let llm = build_llm(&settings, &multiply_tools())?;

    let mut graph = StateGraph::<MessagesState>::new();
    graph
        .add_node("tool_calling_llm", ChatNode::new(llm))?
        .add_edge(START, "tool_calling_llm")?
        .add_edge("tool_calling_llm", END)?;
    let compiled = graph.compile()?;

    run_demos(&compiled)
}
