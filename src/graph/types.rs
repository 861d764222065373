//! Node, edge and identity handles.
//!
//! Nodes never point at their graph directly. Each [`NodeId`] carries the
//! [`GraphId`] of the owning graph, so the graph stays the sole owner of
//! its nodes and identity checks are a plain comparison.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`Graph`](super::Graph) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    pub(crate) fn next() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle of a node inside its owning graph.
///
/// The slot is stable for the node's lifetime: removing other nodes does
/// not renumber it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    graph: GraphId,
    slot: u32,
}

impl NodeId {
    pub(crate) fn new(graph: GraphId, slot: u32) -> Self {
        Self { graph, slot }
    }

    /// The graph that owns this node.
    pub fn graph(&self) -> GraphId {
        self.graph
    }
}

/// A set of nodes, e.g. a candidate solution.
///
/// Ordered so that iteration (and therefore everything derived from it)
/// is deterministic.
pub type NodeSet = BTreeSet<NodeId>;

/// A graph vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    key: String,
    neighbours: BTreeSet<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, key: String) -> Self {
        Self {
            id,
            key,
            neighbours: BTreeSet::new(),
        }
    }

    /// Handle of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Unique key within the owning graph.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The graph that owns this node.
    pub fn graph(&self) -> GraphId {
        self.id.graph
    }

    /// Handles of adjacent nodes.
    pub fn neighbours(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbours.iter().copied()
    }

    /// Number of adjacent nodes.
    pub fn degree(&self) -> usize {
        self.neighbours.len()
    }

    pub fn is_neighbour(&self, other: NodeId) -> bool {
        self.neighbours.contains(&other)
    }

    pub(crate) fn add_neighbour(&mut self, other: NodeId) -> bool {
        self.neighbours.insert(other)
    }

    pub(crate) fn remove_neighbour(&mut self, other: NodeId) -> bool {
        self.neighbours.remove(&other)
    }
}

/// Undirected edge.
///
/// Endpoints are stored in canonical order, so `Edge::new(a, b)` and
/// `Edge::new(b, a)` are equal and hash identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    low: NodeId,
    high: NodeId,
}

impl Edge {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Both endpoints, in canonical order.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.low == node || self.high == node
    }

    /// True when at least one endpoint belongs to `nodes`.
    pub fn is_covered_by(&self, nodes: &NodeSet) -> bool {
        nodes.contains(&self.low) || nodes.contains(&self.high)
    }
}
