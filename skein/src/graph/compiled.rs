//! Compiled state graph: immutable, supports invoke and stream.
//!
//! Built by `StateGraph::compile`. Holds the nodes and, per node, how to find the
//! next one (a fixed edge or a router). Execution is synchronous: a call runs on the
//! caller's thread until END or the first error. The graph itself is never mutated
//! by a run, so one compiled graph can serve many invocations, from many threads.

use std::collections::HashMap;
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::state::State;

use super::error::RunError;
use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_route,
};
use super::run_config::RunConfig;
use super::state_graph::END;
use super::{NextEntry, Node};

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

/// Compiled graph: immutable structure, ready to run.
///
/// Created by `StateGraph::compile()`. Runs from the entry node; after each node the
/// fixed edge or router picks the next one, until END.
#[derive(Clone)]
pub struct CompiledStateGraph<S: State> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Node ids in registration order.
    pub(super) node_order: Vec<String>,
    /// First node to run (the target of the START edge).
    pub(super) first_node_id: String,
    /// Map from node id to how to get next: Unconditional(to_id) or Conditional(router).
    pub(super) next_map: HashMap<String, NextEntry<S>>,
}

/// One executed node and the state right after its update was merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<S> {
    pub node: String,
    pub state: S,
}

impl<S: State> CompiledStateGraph<S> {
    /// Runs the graph from the entry node until END and returns the final state.
    ///
    /// On failure the error carries the state as of the last successful node.
    pub fn invoke(&self, state: S) -> Result<S, RunError<S>> {
        self.invoke_with_config(state, &RunConfig::default())
    }

    /// Like [`invoke`](Self::invoke), with per-run options such as a step limit.
    pub fn invoke_with_config(&self, state: S, config: &RunConfig) -> Result<S, RunError<S>> {
        let mut run = Execution::new(self, state, config);
        loop {
            match run.step()? {
                (_, Progress::Running(next)) => run = next,
                (_, Progress::Finished(state)) => return Ok(state),
            }
        }
    }

    /// Lazily runs the graph, yielding one [`Step`] per executed node.
    ///
    /// Each item holds a snapshot of the state after that node's update. The
    /// iterator ends after the node that routes to END, or right after yielding an
    /// error.
    pub fn stream(&self, state: S) -> Steps<'_, S> {
        self.stream_with_config(state, &RunConfig::default())
    }

    /// Like [`stream`](Self::stream), with per-run options.
    pub fn stream_with_config(&self, state: S, config: &RunConfig) -> Steps<'_, S> {
        Steps {
            run: Some(Execution::new(self, state, config)),
        }
    }

    /// Id of the first node run by every invocation.
    pub fn entry(&self) -> &str {
        &self.first_node_id
    }

    /// Registered node ids, in registration order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.node_order.iter().map(String::as_str)
    }

    /// Outgoing edges of `node_id`: the fixed target or the router.
    pub fn next_entry(&self, node_id: &str) -> Option<&NextEntry<S>> {
        self.next_map.get(node_id)
    }

    pub(super) fn is_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }
}

/// Iterator returned by [`CompiledStateGraph::stream`].
pub struct Steps<'g, S: State> {
    run: Option<Execution<'g, S>>,
}

impl<S: State> Iterator for Steps<'_, S> {
    type Item = Result<Step<S>, RunError<S>>;

    fn next(&mut self) -> Option<Self::Item> {
        let run = self.run.take()?;
        Some(match run.step() {
            Ok((node, Progress::Running(next))) => {
                let state = next.state.clone();
                self.run = Some(next);
                Ok(Step { node, state })
            }
            Ok((node, Progress::Finished(state))) => Ok(Step { node, state }),
            Err(e) => Err(e),
        })
    }
}

impl<S: State> FusedIterator for Steps<'_, S> {}

/// Outcome of one step.
enum Progress<'g, S: State> {
    /// Another node is scheduled.
    Running(Execution<'g, S>),
    /// The node routed to END; this is the final state.
    Finished(S),
}

/// One in-flight run: owns the state, borrows the graph.
///
/// `step` consumes the run so that errors and the final result can take the state
/// by value.
struct Execution<'g, S: State> {
    graph: &'g CompiledStateGraph<S>,
    run_id: u64,
    state: S,
    current: String,
    steps: usize,
    recursion_limit: Option<usize>,
}

impl<'g, S: State> Execution<'g, S> {
    fn new(graph: &'g CompiledStateGraph<S>, state: S, config: &RunConfig) -> Self {
        let run_id = NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed);
        log_graph_start(run_id, &graph.first_node_id);
        Self {
            graph,
            run_id,
            state,
            current: graph.first_node_id.clone(),
            steps: 0,
            recursion_limit: config.recursion_limit,
        }
    }

    /// Runs the current node, merges its update and resolves the next node.
    /// Returns the id of the node that ran.
    fn step(mut self) -> Result<(String, Progress<'g, S>), RunError<S>> {
        let graph = self.graph;
        let run_id = self.run_id;
        let node_id = std::mem::take(&mut self.current);

        if let Some(limit) = self.recursion_limit {
            if self.steps >= limit {
                return Err(failed(
                    run_id,
                    RunError::RecursionLimit {
                        limit,
                        state: self.state,
                    },
                ));
            }
        }

        let (Some(node), Some(next)) = (graph.nodes.get(&node_id), graph.next_map.get(&node_id))
        else {
            // Only compiled ids are scheduled; a miss means a router produced an id
            // that `resolve` should have rejected.
            return Err(failed(
                run_id,
                RunError::Routing {
                    node: node_id.clone(),
                    key: node_id,
                    state: self.state,
                },
            ));
        };

        log_node_start(run_id, &node_id, &self.state);
        let update = match node.run(&self.state) {
            Ok(update) => update,
            Err(source) => {
                return Err(failed(
                    run_id,
                    RunError::NodeExecution {
                        node: node_id,
                        source,
                        state: self.state,
                    },
                ));
            }
        };
        log_node_complete(run_id, &node_id, &update);
        self.state.apply(update);
        self.steps += 1;

        let target = match next {
            NextEntry::Unconditional(to) => {
                log_route(run_id, &node_id, None, to);
                to.clone()
            }
            NextEntry::Conditional(router) => {
                let key = router.route(&self.state);
                match router.resolve(&key, |id| graph.is_node(id)) {
                    Some(to) => {
                        log_route(run_id, &node_id, Some(&key), &to);
                        to
                    }
                    None => {
                        return Err(failed(
                            run_id,
                            RunError::Routing {
                                node: node_id,
                                key,
                                state: self.state,
                            },
                        ));
                    }
                }
            }
        };

        if target == END {
            log_graph_complete(run_id, self.steps);
            return Ok((node_id, Progress::Finished(self.state)));
        }
        self.current = target;
        Ok((node_id, Progress::Running(self)))
    }
}

fn failed<S: State>(run_id: u64, err: RunError<S>) -> RunError<S> {
    log_graph_error(run_id, &err);
    err
}
