//! State graph: nodes plus explicit edges (from → to) and conditional edges.
//!
//! Add nodes with `add_node`, wire them with `add_edge(from, to)` using [`START`] and
//! [`END`] for entry and exit, and use `add_conditional_edges` / `add_branch` to pick
//! the next node from state. Then `compile` to get a [`CompiledStateGraph`].
//!
//! Registration errors ([`BuildError`]) are reported immediately and leave the graph
//! unchanged. Whole-graph checks (entry, reachability, dead ends) run in `compile`,
//! which reports every [`Defect`] at once.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::graph::compile_error::{CompilationError, Defect};
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::conditional::{Branch, ConditionalRouter, NextEntry};
use crate::graph::error::BuildError;
use crate::graph::node::Node;
use crate::state::State;

/// Sentinel for graph entry: use as `from_id` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to_id` in `add_edge(last_node_id, END)`.
pub const END: &str = "__end__";

/// State graph: nodes plus explicit edges and conditional edges.
///
/// Generic over state type `S`. Build with `add_node` / `add_edge(from, to)`, and
/// optionally `add_conditional_edges` or `add_branch` for state-based routing. Then
/// `compile()` to obtain an executable graph.
///
/// ```rust
/// use skein::{AgentError, Message, MessagesState, MessagesUpdate, StateGraph, END, START};
///
/// fn call_llm(_state: &MessagesState) -> Result<MessagesUpdate, AgentError> {
///     Ok(MessagesUpdate::append(vec![Message::assistant("Hi!")]))
/// }
///
/// let mut graph = StateGraph::<MessagesState>::new();
/// graph
///     .add_node("call_llm", call_llm)?
///     .add_edge(START, "call_llm")?
///     .add_edge("call_llm", END)?;
/// let compiled = graph.compile()?;
/// let out = compiled.invoke(MessagesState::from_user("Hello there!"))?;
/// assert_eq!(out.messages.len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct StateGraph<S: State> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Node ids in registration order; drives diagnostics and defect ordering.
    node_order: Vec<String>,
    /// Unconditional edges (from_id, to_id), in registration order.
    edges: Vec<(String, String)>,
    /// Conditional edges (source, router), in registration order.
    conditional_edges: Vec<(String, ConditionalRouter<S>)>,
}

impl<S: State> Default for StateGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateGraph<S> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            node_order: Vec::new(),
            edges: Vec::new(),
            conditional_edges: Vec::new(),
        }
    }

    /// Adds a node under a unique id.
    ///
    /// Fails with `DuplicateNode` if the id is taken and `ReservedName` for START/END;
    /// in both cases the graph is unchanged.
    pub fn add_node<N>(&mut self, id: impl Into<String>, node: N) -> Result<&mut Self, BuildError>
    where
        N: Node<S> + 'static,
    {
        let id = id.into();
        if id == START || id == END {
            return Err(BuildError::ReservedName(id));
        }
        if self.nodes.contains_key(&id) {
            return Err(BuildError::DuplicateNode(id));
        }
        self.nodes.insert(id.clone(), Arc::new(node));
        self.node_order.push(id);
        Ok(self)
    }

    /// Adds an unconditional edge from `from_id` to `to_id`.
    ///
    /// Both ids, other than START/END, must already be registered. An edge may not
    /// leave END or enter START.
    pub fn add_edge(
        &mut self,
        from_id: impl Into<String>,
        to_id: impl Into<String>,
    ) -> Result<&mut Self, BuildError> {
        let (from_id, to_id) = (from_id.into(), to_id.into());
        if from_id == END || to_id == START {
            return Err(BuildError::InvalidEndpoint {
                from: from_id,
                to: to_id,
            });
        }
        if from_id != START {
            self.require_node(&from_id)?;
        }
        if to_id != END {
            self.require_node(&to_id)?;
        }
        self.edges.push((from_id, to_id));
        Ok(self)
    }

    /// Adds a dynamic conditional edge from `source`.
    ///
    /// After `source` runs, `path` is called with the updated state. With a
    /// `path_map`, its return value must be a key of the map and the next node is
    /// `map[key]`; without one, it must be a node id or END. Any other key fails the
    /// run with `RunError::Routing`.
    ///
    /// Path map targets are checked in `compile()`.
    pub fn add_conditional_edges<F>(
        &mut self,
        source: impl Into<String>,
        path: F,
        path_map: Option<HashMap<String, String>>,
    ) -> Result<&mut Self, BuildError>
    where
        F: Fn(&S) -> String + Send + Sync + 'static,
    {
        let source = source.into();
        self.require_node(&source)?;
        let router = ConditionalRouter::new(Arc::new(path), path_map);
        self.conditional_edges.push((source, router));
        Ok(self)
    }

    /// Adds a typed conditional edge from `source` over the closed set `B`.
    ///
    /// Each variant's [`Branch::key`] is resolved through `path_map` (or used as a
    /// node id / END without one). `compile()` rejects the graph if any variant does
    /// not resolve, so the router can not fail at run time.
    pub fn add_branch<B, F>(
        &mut self,
        source: impl Into<String>,
        router: F,
        path_map: Option<HashMap<String, String>>,
    ) -> Result<&mut Self, BuildError>
    where
        B: Branch,
        F: Fn(&S) -> B + Send + Sync + 'static,
    {
        let source = source.into();
        self.require_node(&source)?;
        let router = ConditionalRouter::from_branch(router, path_map);
        self.conditional_edges.push((source, router));
        Ok(self)
    }

    /// Validates the graph and freezes it for execution.
    ///
    /// Checks, all reported together in one [`CompilationError`]:
    /// exactly one edge from START, to a node rather than END; exactly one outgoing
    /// declaration per node; every router destination is a node or END; every node
    /// reachable from START; END reachable from every reachable node.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        let mut defects = Vec::new();

        let entries: Vec<String> = self
            .edges
            .iter()
            .filter(|(from, _)| from == START)
            .map(|(_, to)| to.clone())
            .collect();
        match entries.len() {
            0 => defects.push(Defect::MissingEntry),
            1 if entries[0] == END => defects.push(Defect::EntryIsEnd),
            1 => {}
            _ => defects.push(Defect::MultipleEntries(entries.clone())),
        }

        let mut next_map: HashMap<String, NextEntry<S>> = HashMap::new();
        for id in &self.node_order {
            let plain = self.edges.iter().filter(|(from, _)| from == id);
            let routed = self.conditional_edges.iter().filter(|(from, _)| from == id);
            let mut outgoing = plain
                .map(|(_, to)| NextEntry::Unconditional(to.clone()))
                .chain(routed.map(|(_, router)| NextEntry::Conditional(router.clone())));
            match (outgoing.next(), outgoing.next()) {
                (None, _) => defects.push(Defect::DeadEnd(id.clone())),
                (Some(_), Some(_)) => defects.push(Defect::MultipleOutgoing(id.clone())),
                (Some(entry), None) => {
                    next_map.insert(id.clone(), entry);
                }
            }
        }

        for (source, router) in &self.conditional_edges {
            for to in self.unresolved_targets(router) {
                defects.push(Defect::UnknownTarget {
                    from: source.clone(),
                    to,
                });
            }
        }

        let successors = self.successors();
        let reachable = walk(entries.iter().cloned(), |id| {
            successors.get(id).cloned().unwrap_or_default()
        });
        for id in &self.node_order {
            if !reachable.contains(id) {
                defects.push(Defect::Unreachable(id.clone()));
            }
        }

        let mut predecessors: HashMap<String, Vec<String>> = HashMap::new();
        for (from, targets) in &successors {
            for to in targets {
                predecessors.entry(to.clone()).or_default().push(from.clone());
            }
        }
        let reaches_end = walk(std::iter::once(END.to_string()), |id| {
            predecessors.get(id).cloned().unwrap_or_default()
        });
        for id in &self.node_order {
            let dead_end = self.outgoing_count(id) == 0;
            if reachable.contains(id) && !dead_end && !reaches_end.contains(id) {
                defects.push(Defect::CannotReachEnd(id.clone()));
            }
        }

        if !defects.is_empty() {
            tracing::debug!(defects = defects.len(), "Graph compilation failed");
            return Err(CompilationError { defects });
        }

        let first_node_id = entries.into_iter().next().unwrap_or_default();
        tracing::debug!(
            nodes = self.node_order.len(),
            entry = %first_node_id,
            "Graph compiled"
        );
        Ok(CompiledStateGraph {
            nodes: self.nodes,
            node_order: self.node_order,
            first_node_id,
            next_map,
        })
    }

    fn require_node(&self, id: &str) -> Result<(), BuildError> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(BuildError::UnknownNode(id.to_string()))
        }
    }

    fn outgoing_count(&self, id: &str) -> usize {
        self.edges.iter().filter(|(from, _)| from == id).count()
            + self
                .conditional_edges
                .iter()
                .filter(|(from, _)| from == id)
                .count()
    }

    fn is_target(&self, id: &str) -> bool {
        id == END || self.nodes.contains_key(id)
    }

    /// Router destinations that are neither a node nor END.
    fn unresolved_targets(&self, router: &ConditionalRouter<S>) -> Vec<String> {
        let is_node = |id: &str| self.nodes.contains_key(id);
        if let Some(keys) = &router.declared_keys {
            return keys
                .iter()
                .filter_map(|key| match router.resolve(key, is_node) {
                    Some(target) if self.is_target(&target) => None,
                    Some(target) => Some(target),
                    None => Some(key.to_string()),
                })
                .collect();
        }
        let mut missing: Vec<String> = router
            .path_map
            .iter()
            .flat_map(|map| map.values())
            .filter(|target| !self.is_target(target))
            .cloned()
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }

    /// Possible next ids per node. A dynamic router without a path map may go to
    /// any node or END.
    fn successors(&self) -> HashMap<String, Vec<String>> {
        let mut out: HashMap<String, Vec<String>> = HashMap::new();
        for (from, to) in &self.edges {
            out.entry(from.clone()).or_default().push(to.clone());
        }
        let is_node = |id: &str| self.nodes.contains_key(id);
        for (from, router) in &self.conditional_edges {
            let targets: Vec<String> = match router.known_edges(is_node) {
                Some(edges) => edges.into_iter().map(|(_, to)| to).collect(),
                None => self
                    .node_order
                    .iter()
                    .cloned()
                    .chain(std::iter::once(END.to_string()))
                    .collect(),
            };
            out.entry(from.clone()).or_default().extend(targets);
        }
        out
    }
}

/// Breadth-first walk from `roots`, returning every visited id (roots included).
fn walk<F>(roots: impl IntoIterator<Item = String>, mut next: F) -> HashSet<String>
where
    F: FnMut(&str) -> Vec<String>,
{
    let mut seen = HashSet::new();
    let mut queue: VecDeque<String> = roots.into_iter().collect();
    while let Some(id) = queue.pop_front() {
        if !seen.insert(id.clone()) {
            continue;
        }
        queue.extend(next(&id));
    }
    seen
}
