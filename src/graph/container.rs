//! The undirected graph container.

use super::types::{Edge, GraphId, Node, NodeId, NodeSet};
use crate::error::{GraphinderError, Result};
use crate::random::{create_rng, shuffle};
use rand::rngs::StdRng;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Undirected graph with append-only population semantics.
///
/// A graph is populated through [`add_node`](Graph::add_node) /
/// [`add_edge`](Graph::add_edge) (or [`fill_randomly`](Graph::fill_randomly))
/// and then locked. Locking is a permanent latch: every structural
/// mutation after it is a silent no-op, as is adding a duplicate key or
/// referencing a key that does not exist.
///
/// # Examples
///
/// ```
/// use graphinder::graph::Graph;
///
/// let mut graph = Graph::with_seed(42);
/// graph.add_node("A");
/// graph.add_node("B");
/// graph.add_edge("A", "B");
/// graph.lock();
///
/// graph.add_node("C"); // ignored
/// assert_eq!(graph.total_nodes(), 2);
/// assert!(graph.contains_edge("B", "A"));
/// ```
pub struct Graph {
    id: GraphId,
    nodes: Vec<Node>,
    keys: HashMap<String, NodeId>,
    positions: HashMap<NodeId, usize>,
    edges: HashSet<Edge>,
    next_slot: u32,
    pub(super) max_neighbours: usize,
    locked: AtomicBool,
    random_cycle: Mutex<RandomCycle>,
}

/// Shuffled-without-replacement sequence of node positions.
pub(super) struct RandomCycle {
    pub(super) rng: StdRng,
    pending: Vec<usize>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Creates an empty graph with a randomly seeded generator.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Creates an empty graph whose random node draws are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            id: GraphId::next(),
            nodes: Vec::new(),
            keys: HashMap::new(),
            positions: HashMap::new(),
            edges: HashSet::new(),
            next_slot: 0,
            max_neighbours: 0,
            locked: AtomicBool::new(false),
            random_cycle: Mutex::new(RandomCycle {
                rng: create_rng(seed),
                pending: Vec::new(),
            }),
        }
    }

    /// Creates a graph holding one node per distinct key.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_keys_with_seed(keys, rand::random())
    }

    /// Like [`from_keys`](Self::from_keys), with reproducible random node
    /// draws.
    pub fn from_keys_with_seed<I, S>(keys: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut graph = Self::with_seed(seed);
        for key in keys {
            graph.add_node(key);
        }
        graph
    }

    /// Identity of this graph instance.
    pub fn id(&self) -> GraphId {
        self.id
    }

    // ---- structural mutation ----

    /// Adds a node. No-op when locked or when the key already exists.
    pub fn add_node(&mut self, key: impl Into<String>) {
        let key = key.into();
        if !self.can_mutate() || self.keys.contains_key(&key) {
            return;
        }
        let id = NodeId::new(self.id, self.next_slot);
        self.next_slot += 1;
        self.positions.insert(id, self.nodes.len());
        self.keys.insert(key.clone(), id);
        self.nodes.push(Node::new(id, key));
        self.reset_random_cycle();
    }

    /// Removes a node together with every edge touching it.
    ///
    /// No-op when locked or when the key does not exist.
    pub fn remove_node(&mut self, key: &str) {
        if !self.can_mutate() {
            return;
        }
        let Some(id) = self.keys.remove(key) else {
            return;
        };
        let Some(position) = self.positions.remove(&id) else {
            return;
        };
        let removed = self.nodes.remove(position);
        for (i, node) in self.nodes.iter().enumerate().skip(position) {
            self.positions.insert(node.id(), i);
        }
        for neighbour in removed.neighbours() {
            if let Some(&p) = self.positions.get(&neighbour) {
                self.nodes[p].remove_neighbour(id);
            }
        }
        self.edges.retain(|edge| !edge.touches(id));
        self.reset_random_cycle();
    }

    /// Connects two nodes. No-op when locked, when either key is unknown,
    /// or when `from == to`.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        if !self.can_mutate() {
            return;
        }
        if let Some((a, b)) = self.positions_of(from, to) {
            self.connect(a, b);
        }
    }

    /// Disconnects two nodes. No-op when locked or when either key is unknown.
    pub fn remove_edge(&mut self, from: &str, to: &str) {
        if !self.can_mutate() {
            return;
        }
        let Some((a, b)) = self.positions_of(from, to) else {
            return;
        };
        let (ia, ib) = (self.nodes[a].id(), self.nodes[b].id());
        if self.edges.remove(&Edge::new(ia, ib)) {
            self.nodes[a].remove_neighbour(ib);
            self.nodes[b].remove_neighbour(ia);
        }
    }

    /// Locks the graph; population is considered complete.
    pub fn lock(&self) {
        if !self.locked.swap(true, Ordering::AcqRel) {
            debug!(
                graph = ?self.id,
                nodes = self.nodes.len(),
                edges = self.edges.len(),
                "graph locked"
            );
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Whether structural mutations are still accepted.
    pub fn can_mutate(&self) -> bool {
        !self.is_locked()
    }

    // ---- queries ----

    pub fn contains_node(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        match (self.keys.get(a), self.keys.get(b)) {
            (Some(&ia), Some(&ib)) => self.edges.contains(&Edge::new(ia, ib)),
            _ => false,
        }
    }

    /// Whether `id` is a node of this graph.
    pub fn owns(&self, id: NodeId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Nodes in insertion order. Index `i` corresponds to genotype bit `i`.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.positions.get(&id).map(|&p| &self.nodes[p])
    }

    pub fn node_by_key(&self, key: &str) -> Option<&Node> {
        self.keys.get(key).and_then(|&id| self.node(id))
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn total_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn total_edges(&self) -> usize {
        self.edges.len()
    }

    /// Maximum neighbours per node requested by
    /// [`fill_randomly`](Graph::fill_randomly); zero otherwise.
    pub fn max_neighbours(&self) -> usize {
        self.max_neighbours
    }

    /// A graph is usable by algorithms once it holds at least one node.
    pub fn is_valid(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Every node of the graph as a set.
    pub fn all_nodes(&self) -> NodeSet {
        self.nodes.iter().map(Node::id).collect()
    }

    /// Returns a node such that every `total_nodes()` consecutive calls
    /// yield each node exactly once.
    ///
    /// Draws from a shuffled permutation of all positions and reshuffles a
    /// fresh one when it runs out. Returns `None` for an empty graph.
    pub fn random_node(&self) -> Option<&Node> {
        if self.nodes.is_empty() {
            return None;
        }
        let mut cycle = self
            .random_cycle
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if cycle.pending.is_empty() {
            let mut permutation: Vec<usize> = (0..self.nodes.len()).collect();
            shuffle(&mut permutation, &mut cycle.rng);
            cycle.pending = permutation;
        }
        cycle.pending.pop().map(|p| &self.nodes[p])
    }

    /// Decodes a genotype into the set of nodes at `true` positions.
    ///
    /// # Errors
    /// [`GraphinderError::InvalidGraphState`] when the vector length differs
    /// from the node count.
    pub fn binary_solution_as_nodes(&self, bits: &[bool]) -> Result<NodeSet> {
        if bits.len() != self.nodes.len() {
            return Err(GraphinderError::InvalidGraphState(format!(
                "binary solution has {} bits but graph has {} nodes",
                bits.len(),
                self.nodes.len()
            )));
        }
        Ok(bits
            .iter()
            .zip(&self.nodes)
            .filter(|(&bit, _)| bit)
            .map(|(_, node)| node.id())
            .collect())
    }

    /// Encodes a node set as a genotype. Nodes of other graphs are ignored.
    pub fn nodes_as_binary_solution(&self, nodes: &NodeSet) -> Vec<bool> {
        self.nodes.iter().map(|n| nodes.contains(&n.id())).collect()
    }

    /// Keys of the given nodes, in node order. Unknown handles are skipped.
    pub fn keys_of(&self, nodes: &NodeSet) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| nodes.contains(&n.id()))
            .map(|n| n.key().to_string())
            .collect()
    }

    /// Resolves keys back into node handles. Unknown keys are skipped.
    pub fn nodes_by_keys<I, S>(&self, keys: I) -> NodeSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .filter_map(|k| self.keys.get(k.as_ref()).copied())
            .collect()
    }

    // ---- internals ----

    pub(super) fn clear(&mut self) {
        self.nodes.clear();
        self.keys.clear();
        self.positions.clear();
        self.edges.clear();
        self.reset_random_cycle();
    }

    /// Adds the edge between two positions; returns whether it was new.
    pub(super) fn connect(&mut self, a: usize, b: usize) -> bool {
        if a == b {
            return false;
        }
        let (ia, ib) = (self.nodes[a].id(), self.nodes[b].id());
        if !self.edges.insert(Edge::new(ia, ib)) {
            return false;
        }
        self.nodes[a].add_neighbour(ib);
        self.nodes[b].add_neighbour(ia);
        true
    }

    pub(super) fn random_cycle_mut(&mut self) -> &mut RandomCycle {
        self.random_cycle
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn reset_random_cycle(&mut self) {
        self.random_cycle_mut().pending.clear();
    }

    fn positions_of(&self, from: &str, to: &str) -> Option<(usize, usize)> {
        let a = self.positions.get(self.keys.get(from)?)?;
        let b = self.positions.get(self.keys.get(to)?)?;
        Some((*a, *b))
    }

    fn edge_keys(&self) -> HashSet<(&str, &str)> {
        self.edges
            .iter()
            .filter_map(|edge| {
                let (a, b) = edge.endpoints();
                let (ka, kb) = (self.node(a)?.key(), self.node(b)?.key());
                Some(if ka <= kb { (ka, kb) } else { (kb, ka) })
            })
            .collect()
    }
}

/// Two graphs are equal when they hold the same node keys and the same
/// edges between those keys. Identity, lock state and generator state are
/// not compared.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes.len() == other.nodes.len()
            && self.keys.keys().all(|k| other.keys.contains_key(k))
            && self.edge_keys() == other.edge_keys()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("id", &self.id)
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .field("locked", &self.is_locked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn path_abc() -> Graph {
        let mut graph = Graph::with_seed(42);
        for key in ["A", "B", "C"] {
            graph.add_node(key);
        }
        graph.add_edge("A", "B");
        graph.add_edge("B", "C");
        graph
    }

    #[test]
    fn test_add_node_twice_is_noop() {
        let mut graph = Graph::with_seed(1);
        graph.add_node("A");
        graph.add_node("A");
        assert_eq!(graph.total_nodes(), 1);
    }

    #[test]
    fn test_edges_are_undirected() {
        let graph = path_abc();
        assert!(graph.contains_edge("A", "B"));
        assert!(graph.contains_edge("B", "A"));
        assert!(!graph.contains_edge("A", "C"));

        let a = graph.node_by_key("A").unwrap();
        let b = graph.node_by_key("B").unwrap();
        assert!(a.is_neighbour(b.id()));
        assert!(b.is_neighbour(a.id()));
        assert_eq!(b.degree(), 2);
    }

    #[test]
    fn test_edge_with_unknown_key_is_noop() {
        let mut graph = path_abc();
        graph.add_edge("A", "Z");
        graph.remove_edge("Z", "A");
        assert_eq!(graph.total_edges(), 2);
    }

    #[test]
    fn test_self_loop_is_noop() {
        let mut graph = path_abc();
        graph.add_edge("A", "A");
        assert_eq!(graph.total_edges(), 2);
    }

    #[test]
    fn test_remove_edge() {
        let mut graph = path_abc();
        graph.remove_edge("B", "A");
        assert!(!graph.contains_edge("A", "B"));
        assert_eq!(graph.node_by_key("A").unwrap().degree(), 0);
        assert_eq!(graph.node_by_key("B").unwrap().degree(), 1);
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut graph = path_abc();
        let b = graph.node_by_key("B").unwrap().id();
        graph.remove_node("B");

        assert_eq!(graph.total_nodes(), 2);
        assert_eq!(graph.total_edges(), 0);
        assert!(!graph.contains_node("B"));
        assert!(!graph.owns(b));
        assert_eq!(graph.node_by_key("A").unwrap().degree(), 0);
        assert_eq!(graph.nodes()[1].key(), "C");
        assert_eq!(graph.node_by_key("C").unwrap().key(), "C");
    }

    #[test]
    fn test_locked_graph_ignores_mutations() {
        let mut graph = path_abc();
        graph.lock();
        assert!(graph.is_locked());
        assert!(!graph.can_mutate());

        graph.add_node("D");
        graph.remove_node("A");
        graph.add_edge("A", "C");
        graph.remove_edge("A", "B");

        assert_eq!(graph.total_nodes(), 3);
        assert_eq!(graph.total_edges(), 2);
        assert!(graph.contains_edge("A", "B"));
        assert!(!graph.contains_edge("A", "C"));
    }

    #[test]
    fn test_random_node_empty_graph() {
        let graph = Graph::with_seed(1);
        assert!(graph.random_node().is_none());
    }

    #[test]
    fn test_random_node_cycle_covers_every_node() {
        let mut graph = Graph::with_seed(7);
        for i in 0..10 {
            graph.add_node(i.to_string());
        }
        for _ in 0..3 {
            let mut seen: Vec<String> = (0..10)
                .map(|_| graph.random_node().unwrap().key().to_string())
                .collect();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), 10);
        }
    }

    #[test]
    fn test_binary_solution_as_nodes() {
        let graph = path_abc();
        let nodes = graph.binary_solution_as_nodes(&[true, false, true]).unwrap();
        assert_eq!(graph.keys_of(&nodes), vec!["A", "C"]);
        assert_eq!(
            graph.nodes_as_binary_solution(&nodes),
            vec![true, false, true]
        );
    }

    #[test]
    fn test_binary_solution_length_mismatch() {
        let graph = path_abc();
        let err = graph.binary_solution_as_nodes(&[true, false]).unwrap_err();
        assert!(matches!(err, GraphinderError::InvalidGraphState(_)));
    }

    #[test]
    fn test_nodes_by_keys_skips_unknown() {
        let graph = path_abc();
        let nodes = graph.nodes_by_keys(["A", "Q"]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(graph.keys_of(&nodes), vec!["A"]);
    }

    #[test]
    fn test_equality_ignores_identity() {
        let a = path_abc();
        let mut b = Graph::with_seed(99);
        for key in ["C", "B", "A"] {
            b.add_node(key);
        }
        b.add_edge("C", "B");
        assert_ne!(a, b);
        b.add_edge("B", "A");
        assert_eq!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_is_valid() {
        assert!(!Graph::with_seed(1).is_valid());
        assert!(path_abc().is_valid());
    }

    proptest! {
        #[test]
        fn prop_duplicate_keys_never_grow_graph(keys in prop::collection::vec("[a-e]", 0..30)) {
            let mut graph = Graph::with_seed(3);
            for key in &keys {
                graph.add_node(key.as_str());
            }
            let distinct: HashSet<&String> = keys.iter().collect();
            prop_assert_eq!(graph.total_nodes(), distinct.len());
        }

        #[test]
        fn prop_random_node_cycle(n in 1usize..25, seed in any::<u64>()) {
            let mut graph = Graph::with_seed(seed);
            for i in 0..n {
                graph.add_node(i.to_string());
            }
            let mut seen = HashSet::new();
            for _ in 0..n {
                seen.insert(graph.random_node().unwrap().id());
            }
            prop_assert_eq!(seen.len(), n);
        }
    }
}
