//! Minimum vertex cover.

use super::criteria::Criteria;
use super::registry::ProblemKind;
use super::types::{Problem, ProblemBinding};
use crate::graph::{Graph, NodeSet};

/// Find the smallest node set touching every edge.
///
/// A solution is correct when every edge has at least one endpoint in it;
/// its outcome is the number of nodes.
#[derive(Debug, Default)]
pub struct MinimumVertexCover {
    binding: ProblemBinding,
}

impl MinimumVertexCover {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Problem for MinimumVertexCover {
    fn kind(&self) -> ProblemKind {
        ProblemKind::MinimumVertexCover
    }

    fn criteria(&self) -> Criteria {
        Criteria::SmallerIsBetter
    }

    fn binding(&self) -> &ProblemBinding {
        &self.binding
    }

    fn is_feasible(&self, graph: &Graph, nodes: &NodeSet) -> bool {
        graph.edges().all(|edge| edge.is_covered_by(nodes))
    }

    fn objective(&self, _graph: &Graph, nodes: &NodeSet) -> i64 {
        nodes.len() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphinderError;
    use std::sync::Arc;

    fn path_abc() -> Arc<Graph> {
        let mut graph = Graph::with_seed(42);
        for key in ["A", "B", "C"] {
            graph.add_node(key);
        }
        graph.add_edge("A", "B");
        graph.add_edge("B", "C");
        Arc::new(graph)
    }

    fn bound() -> (Arc<Graph>, MinimumVertexCover) {
        let graph = path_abc();
        let problem = MinimumVertexCover::new();
        problem.initialize(Arc::clone(&graph)).unwrap();
        (graph, problem)
    }

    #[test]
    fn test_path_covers() {
        let (graph, problem) = bound();

        let b = graph.nodes_by_keys(["B"]);
        assert!(problem.is_solution_correct(&b));
        assert_eq!(problem.solution_outcome(&b), 1);

        let ac = graph.nodes_by_keys(["A", "C"]);
        assert!(problem.is_solution_correct(&ac));
        assert_eq!(problem.solution_outcome(&ac), 2);

        let a = graph.nodes_by_keys(["A"]);
        assert!(!problem.is_solution_correct(&a));
        assert_eq!(problem.solution_outcome(&a), i64::MAX);
    }

    #[test]
    fn test_binary_solution() {
        let (_, problem) = bound();
        assert!(problem.is_binary_solution_correct(&[false, true, false]).unwrap());
        assert!(!problem.is_binary_solution_correct(&[true, false, false]).unwrap());
        assert!(matches!(
            problem.is_binary_solution_correct(&[true]),
            Err(GraphinderError::InvalidGraphState(_))
        ));
    }

    #[test]
    fn test_set_new_solution_rejects_incorrect() {
        let (graph, problem) = bound();
        let b = graph.nodes_by_keys(["B"]);
        problem.set_new_solution(b.clone()).unwrap();
        assert_eq!(problem.current_solution(), b);
        assert_eq!(problem.current_outcome(), 1);

        let err = problem
            .set_new_solution(graph.nodes_by_keys(["A"]))
            .unwrap_err();
        assert!(matches!(err, GraphinderError::DomainConsistency { .. }));
        assert_eq!(problem.current_solution(), b);
    }

    #[test]
    fn test_initial_solution_is_empty() {
        let (_, problem) = bound();
        assert!(problem.current_solution().is_empty());
        assert!(!problem.is_current_solution_correct());
        assert_eq!(problem.current_outcome(), Criteria::SmallerIsBetter.worst());
    }

    #[test]
    fn test_cannot_rebind_to_other_graph() {
        let (graph, problem) = bound();
        assert!(problem.initialize(Arc::clone(&graph)).is_ok());

        let err = problem.initialize(path_abc()).unwrap_err();
        assert!(matches!(err, GraphinderError::DomainConsistency { .. }));
        assert_eq!(problem.graph().unwrap().id(), graph.id());
    }

    #[test]
    fn test_foreign_nodes_are_incorrect() {
        let (_, problem) = bound();
        let other = path_abc();
        let foreign = other.all_nodes();
        assert!(!problem.is_solution_correct(&foreign));
    }

    #[test]
    fn test_unbound_problem() {
        let problem = MinimumVertexCover::new();
        assert!(!problem.is_solution_correct(&NodeSet::new()));
        assert!(matches!(
            problem.set_new_solution(NodeSet::new()),
            Err(GraphinderError::InvalidOperationState(_))
        ));
    }

    #[test]
    fn test_edgeless_graph_empty_cover() {
        let graph = Arc::new(Graph::from_keys(["solo"]));
        let problem = MinimumVertexCover::new();
        problem.initialize(graph).unwrap();
        assert!(problem.is_solution_correct(&NodeSet::new()));
        assert_eq!(problem.solution_outcome(&NodeSet::new()), 0);
    }
}
