//! Plain-data form of a graph for persistence collaborators.

use super::container::Graph;

/// Node keys and key pairs of a graph.
///
/// Storage layers persist this instead of the live [`Graph`]. Rebuilding a
/// graph from a record reproduces an equal graph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphRecord {
    /// Node keys in graph order.
    pub nodes: Vec<String>,
    /// Edges as key pairs, sorted.
    pub edges: Vec<(String, String)>,
}

impl Graph {
    /// Snapshots the graph's keys and edges.
    pub fn to_record(&self) -> GraphRecord {
        let nodes = self.nodes().iter().map(|n| n.key().to_string()).collect();
        let mut edges: Vec<(String, String)> = self
            .edges()
            .filter_map(|edge| {
                let (a, b) = edge.endpoints();
                let (a, b) = (self.node(a)?.key(), self.node(b)?.key());
                let pair = if a <= b { (a, b) } else { (b, a) };
                Some((pair.0.to_string(), pair.1.to_string()))
            })
            .collect();
        edges.sort();
        GraphRecord { nodes, edges }
    }

    /// Rebuilds a locked graph from a record.
    ///
    /// Duplicate keys and edges referencing unknown keys are ignored, the
    /// same way the corresponding mutation calls ignore them.
    pub fn from_record(record: &GraphRecord) -> Self {
        Self::from_record_with_seed(record, rand::random())
    }

    /// Like [`from_record`](Self::from_record), with reproducible random
    /// node draws.
    pub fn from_record_with_seed(record: &GraphRecord, seed: u64) -> Self {
        let mut graph = Graph::from_keys_with_seed(record.nodes.iter().map(String::as_str), seed);
        for (a, b) in &record.edges {
            graph.add_edge(a, b);
        }
        graph.lock();
        graph
    }
}
