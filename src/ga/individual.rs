//! Candidate solutions encoded as bit genotypes.

use crate::error::{GraphinderError, Result};
use crate::graph::{Graph, NodeSet};
use crate::problem::{Criteria, Problem};
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// A candidate solution of the genetic algorithm.
///
/// Bit `i` of the genotype selects the `i`-th node of the graph. The
/// outcome is computed by the problem once, at construction; individuals
/// are immutable afterwards and operators always produce new ones.
#[derive(Clone)]
pub struct Individual {
    graph: Arc<Graph>,
    problem: Arc<dyn Problem>,
    genotype: Vec<bool>,
    outcome: i64,
    correct: bool,
}

impl Individual {
    /// Creates and evaluates an individual.
    ///
    /// # Errors
    /// - [`GraphinderError::DomainConsistency`] when `problem` is not bound
    ///   to `graph`
    /// - [`GraphinderError::InvalidGraphState`] when the genotype length
    ///   differs from the node count
    pub fn new(graph: Arc<Graph>, problem: Arc<dyn Problem>, genotype: Vec<bool>) -> Result<Self> {
        match problem.graph() {
            Some(bound) if bound.id() == graph.id() => {}
            _ => {
                return Err(GraphinderError::domain(
                    "creating individual",
                    "problem is not bound to the individual's graph",
                ))
            }
        }
        let nodes = graph.binary_solution_as_nodes(&genotype)?;
        let correct = problem.is_solution_correct(&nodes);
        let outcome = problem.solution_outcome(&nodes);
        Ok(Self {
            graph,
            problem,
            genotype,
            outcome,
            correct,
        })
    }

    /// Creates an individual whose bits are set with probability `density`.
    pub fn random<R: Rng>(
        graph: Arc<Graph>,
        problem: Arc<dyn Problem>,
        density: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let density = density.clamp(0.0, 1.0);
        let genotype = (0..graph.total_nodes())
            .map(|_| rng.random_bool(density))
            .collect();
        Self::new(graph, problem, genotype)
    }

    /// A new individual on the same graph and problem.
    pub fn with_genotype(&self, genotype: Vec<bool>) -> Result<Self> {
        Self::new(Arc::clone(&self.graph), Arc::clone(&self.problem), genotype)
    }

    pub fn genotype(&self) -> &[bool] {
        &self.genotype
    }

    pub fn len(&self) -> usize {
        self.genotype.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genotype.is_empty()
    }

    /// Problem outcome; the criteria's worst value when incorrect.
    pub fn outcome(&self) -> i64 {
        self.outcome
    }

    pub fn is_correct(&self) -> bool {
        self.correct
    }

    pub fn criteria(&self) -> Criteria {
        self.problem.criteria()
    }

    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    pub fn problem(&self) -> &Arc<dyn Problem> {
        &self.problem
    }

    /// Nodes selected by the genotype.
    pub fn solution(&self) -> NodeSet {
        self.graph
            .nodes()
            .iter()
            .zip(&self.genotype)
            .filter(|(_, &bit)| bit)
            .map(|(node, _)| node.id())
            .collect()
    }

    pub fn same_graph(&self, other: &Individual) -> bool {
        self.graph.id() == other.graph.id()
    }

    pub fn same_problem(&self, other: &Individual) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.problem), Arc::as_ptr(&other.problem))
    }

    /// Whether `other` was built against the same graph and problem.
    pub fn is_compatible_with(&self, other: &Individual) -> bool {
        self.same_graph(other) && self.same_problem(other)
    }

    /// Whether this individual's outcome beats `other`'s.
    pub fn is_better_than(&self, other: &Individual) -> bool {
        self.criteria().is_better(self.outcome, other.outcome)
    }
}

impl fmt::Debug for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: String = self
            .genotype
            .iter()
            .map(|&b| if b { '1' } else { '0' })
            .collect();
        f.debug_struct("Individual")
            .field("graph", &self.graph.id())
            .field("genotype", &bits)
            .field("outcome", &self.outcome)
            .field("correct", &self.correct)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::problem::MinimumVertexCover;
    use crate::random::create_rng;

    /// Path A-B-C with a bound vertex cover problem.
    pub(crate) fn path_abc() -> (Arc<Graph>, Arc<dyn Problem>) {
        let mut graph = Graph::with_seed(42);
        for key in ["A", "B", "C"] {
            graph.add_node(key);
        }
        graph.add_edge("A", "B");
        graph.add_edge("B", "C");
        graph.lock();
        let graph = Arc::new(graph);
        let problem: Arc<dyn Problem> = Arc::new(MinimumVertexCover::new());
        problem.initialize(Arc::clone(&graph)).unwrap();
        (graph, problem)
    }

    #[test]
    fn test_outcome_is_derived_from_problem() {
        let (graph, problem) = path_abc();
        let b = Individual::new(Arc::clone(&graph), Arc::clone(&problem), vec![false, true, false]).unwrap();
        assert!(b.is_correct());
        assert_eq!(b.outcome(), 1);
        assert_eq!(graph.keys_of(&b.solution()), vec!["B"]);

        let a = b.with_genotype(vec![true, false, false]).unwrap();
        assert!(!a.is_correct());
        assert_eq!(a.outcome(), i64::MAX);
        assert!(b.is_better_than(&a));
        assert!(!a.is_better_than(&b));
    }

    #[test]
    fn test_length_mismatch() {
        let (graph, problem) = path_abc();
        let err = Individual::new(graph, problem, vec![true]).unwrap_err();
        assert!(matches!(err, GraphinderError::InvalidGraphState(_)));
    }

    #[test]
    fn test_unbound_problem_rejected() {
        let (graph, _) = path_abc();
        let unbound: Arc<dyn Problem> = Arc::new(MinimumVertexCover::new());
        let err = Individual::new(graph, unbound, vec![true, true, true]).unwrap_err();
        assert!(matches!(err, GraphinderError::DomainConsistency { .. }));
    }

    #[test]
    fn test_compatibility() {
        let (graph, problem) = path_abc();
        let mut rng = create_rng(42);
        let x = Individual::random(Arc::clone(&graph), Arc::clone(&problem), 0.5, &mut rng).unwrap();
        let y = Individual::random(Arc::clone(&graph), Arc::clone(&problem), 0.5, &mut rng).unwrap();
        assert!(x.is_compatible_with(&y));

        let (other_graph, other_problem) = path_abc();
        let z = Individual::random(other_graph, other_problem, 0.5, &mut rng).unwrap();
        assert!(!x.same_graph(&z));
        assert!(!x.same_problem(&z));
    }

    #[test]
    fn test_random_density_extremes() {
        let (graph, problem) = path_abc();
        let mut rng = create_rng(1);
        let full = Individual::random(Arc::clone(&graph), Arc::clone(&problem), 1.0, &mut rng).unwrap();
        assert!(full.genotype().iter().all(|&b| b));
        let none = Individual::random(graph, problem, 0.0, &mut rng).unwrap();
        assert!(none.genotype().iter().all(|&b| !b));
    }
}
