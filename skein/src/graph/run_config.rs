//! Per-invocation options.

/// Options for a single `invoke_with_config` / `stream_with_config` call.
///
/// The default has no step limit: a graph with a cycle runs until a router sends
/// it to END.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Maximum number of node executions; `None` means unlimited.
    pub recursion_limit: Option<usize>,
}

impl RunConfig {
    /// Config with a step limit.
    pub fn with_recursion_limit(limit: usize) -> Self {
        Self {
            recursion_limit: Some(limit),
        }
    }
}
