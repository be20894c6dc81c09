//! Conditional edges: route to the next node based on state.
//!
//! A source node has a routing function that takes the state (after the source ran)
//! and returns a key; the key is looked up in an optional path map, or used directly
//! as the next node id (or END) when there is no map.
//!
//! Two router flavors share [`ConditionalRouter`]:
//!
//! - dynamic: `Fn(&S) -> String`, registered with `StateGraph::add_conditional_edges`.
//!   A key that resolves nowhere is a run-time `RunError::Routing`.
//! - typed: `Fn(&S) -> B` with `B: Branch`, registered with `StateGraph::add_branch`.
//!   Every variant of `B` is resolved in `compile()`, so a typed router can not
//!   produce a routing error at run time.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use super::END;

/// Router function: takes a reference to state and returns a routing key.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// A closed set of routing outcomes.
///
/// Implement on a fieldless enum; `ALL` must list every variant so the graph can
/// check each one at compile time.
///
/// ```rust
/// use skein::graph::Branch;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Mood {
///     Happy,
///     Sad,
/// }
///
/// impl Branch for Mood {
///     const ALL: &'static [Self] = &[Mood::Happy, Mood::Sad];
///
///     fn key(&self) -> &'static str {
///         match self {
///             Mood::Happy => "node_2",
///             Mood::Sad => "node_3",
///         }
///     }
/// }
///
/// assert_eq!(Mood::ALL.len(), 2);
/// ```
pub trait Branch: Copy + Debug + Send + Sync + 'static {
    /// Every variant.
    const ALL: &'static [Self];

    /// Routing key for this variant: a path map key, or a node id / END when
    /// the edge has no path map.
    fn key(&self) -> &'static str;
}

/// Conditional edge definition: routing function plus optional path map.
///
/// - When `path_map` is `None`, the key must be a registered node id or END.
/// - When `path_map` is `Some(map)`, the key must be a key of `map`; the next node is
///   `map[key]`. Unlike a plain lookup-or-fallback, an unmapped key is an error.
#[derive(Clone)]
pub struct ConditionalRouter<S> {
    /// Function that returns a routing key from the current state.
    pub(super) path: ConditionalRouterFn<S>,
    /// Optional map from routing key to node id (or END).
    pub(super) path_map: Option<HashMap<String, String>>,
    /// Every key the router can return, when it is known up front (typed branches).
    pub(super) declared_keys: Option<Vec<&'static str>>,
}

impl<S> ConditionalRouter<S>
where
    S: Send + Sync + 'static,
{
    /// Builds a dynamic router with an optional path map.
    pub fn new(path: ConditionalRouterFn<S>, path_map: Option<HashMap<String, String>>) -> Self {
        Self {
            path,
            path_map,
            declared_keys: None,
        }
    }

    /// Builds a typed router over the closed set `B`.
    pub fn from_branch<B, F>(router: F, path_map: Option<HashMap<String, String>>) -> Self
    where
        B: Branch,
        F: Fn(&S) -> B + Send + Sync + 'static,
    {
        Self {
            path: Arc::new(move |state: &S| router(state).key().to_string()),
            path_map,
            declared_keys: Some(B::ALL.iter().map(Branch::key).collect()),
        }
    }

    /// Calls the routing function.
    pub fn route(&self, state: &S) -> String {
        (self.path)(state)
    }

    /// Resolves a routing key to the next node id (or END).
    ///
    /// `is_node` tells whether an id is a registered node. Returns `None` when the
    /// key is not in the path map, or (without a map) is neither a node nor END.
    pub fn resolve(&self, key: &str, is_node: impl Fn(&str) -> bool) -> Option<String> {
        match &self.path_map {
            Some(map) => map.get(key).cloned(),
            None if key == END || is_node(key) => Some(key.to_string()),
            None => None,
        }
    }

    /// Edges this router can take, as `(key, target)` pairs, when they are known
    /// without running it. `None` for a dynamic router without a path map.
    ///
    /// Typed routers list their declared keys (targets left unresolved are
    /// reported as the raw key); mapped routers list the map in key order.
    pub fn known_edges(&self, is_node: impl Fn(&str) -> bool) -> Option<Vec<(String, String)>> {
        if let Some(keys) = &self.declared_keys {
            let edges = keys
                .iter()
                .map(|key| {
                    let target = self
                        .resolve(key, &is_node)
                        .unwrap_or_else(|| key.to_string());
                    (key.to_string(), target)
                })
                .collect();
            return Some(edges);
        }
        self.path_map.as_ref().map(|map| {
            let mut edges: Vec<(String, String)> =
                map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            edges.sort();
            edges
        })
    }

    /// True for a typed router.
    pub fn is_typed(&self) -> bool {
        self.declared_keys.is_some()
    }
}

/// How to determine the next node after a given node runs.
///
/// Stored in the compiled graph per node: `Unconditional(to_id)` for a plain edge,
/// `Conditional(router)` when the next node is decided from state at run time.
#[derive(Clone)]
pub enum NextEntry<S> {
    /// Single fixed next node (or END).
    Unconditional(String),
    /// Next node is decided by the router from state.
    Conditional(ConditionalRouter<S>),
}
