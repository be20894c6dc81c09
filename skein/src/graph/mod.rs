//! State graph: build, compile, run.
//!
//! [`StateGraph`]: add nodes and edges (fixed or conditional), `compile` to a
//! [`CompiledStateGraph`], then `invoke` or `stream` with an initial state.

mod compile_error;
mod compiled;
mod conditional;
mod error;
mod logging;
mod node;
mod run_config;
mod state_graph;
mod visualization;

pub use compile_error::{CompilationError, Defect};
pub use compiled::{CompiledStateGraph, Step, Steps};
pub use conditional::{Branch, ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use error::{BuildError, RunError};
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_route,
};
pub use node::{NameNode, Node};
pub use run_config::RunConfig;
pub use state_graph::{StateGraph, END, START};
pub use visualization::{generate_dot, generate_mermaid, generate_text};
