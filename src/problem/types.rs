//! Core trait for graph optimization problems.

use super::criteria::Criteria;
use super::registry::ProblemKind;
use crate::error::{GraphinderError, Result};
use crate::graph::{Graph, NodeSet};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Graph binding and current solution shared by every problem.
///
/// The graph can be bound exactly once; the current solution changes only
/// through [`Problem::set_new_solution`].
#[derive(Debug, Default)]
pub struct ProblemBinding {
    graph: OnceLock<Arc<Graph>>,
    solution: RwLock<NodeSet>,
}

impl ProblemBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `graph`. Binding the same graph again is accepted.
    pub fn bind(&self, graph: Arc<Graph>) -> Result<()> {
        let bound = self.graph.get_or_init(|| Arc::clone(&graph));
        if bound.id() != graph.id() {
            return Err(GraphinderError::domain(
                "initializing problem",
                "problem is already bound to a different graph",
            ));
        }
        Ok(())
    }

    pub fn graph(&self) -> Option<&Arc<Graph>> {
        self.graph.get()
    }

    pub fn solution(&self) -> NodeSet {
        self.solution
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, nodes: NodeSet) {
        *self.solution.write().unwrap_or_else(PoisonError::into_inner) = nodes;
    }
}

/// A combinatorial problem posed on a graph.
///
/// Implementors supply the feasibility predicate and the objective; the
/// graph binding, solution bookkeeping and criteria-aware scoring are
/// provided.
///
/// # Examples
///
/// ```ignore
/// #[derive(Debug, Default)]
/// struct IndependentSet { binding: ProblemBinding }
///
/// impl Problem for IndependentSet {
///     fn kind(&self) -> ProblemKind { ... }
///     fn criteria(&self) -> Criteria { Criteria::BiggerIsBetter }
///     fn binding(&self) -> &ProblemBinding { &self.binding }
///     fn is_feasible(&self, graph: &Graph, nodes: &NodeSet) -> bool {
///         graph.edges().all(|e| {
///             let (a, b) = e.endpoints();
///             !(nodes.contains(&a) && nodes.contains(&b))
///         })
///     }
///     fn objective(&self, _graph: &Graph, nodes: &NodeSet) -> i64 {
///         nodes.len() as i64
///     }
/// }
/// ```
///
/// # Thread Safety
///
/// Problems are shared through `Arc<dyn Problem>` between an algorithm and
/// the individuals it creates, so they must be `Send + Sync`.
pub trait Problem: Send + Sync + std::fmt::Debug {
    /// Registry tag of this problem.
    fn kind(&self) -> ProblemKind;

    /// Optimization direction.
    fn criteria(&self) -> Criteria;

    /// Graph binding and current solution storage.
    fn binding(&self) -> &ProblemBinding;

    /// Problem-specific feasibility predicate.
    ///
    /// Only called with nodes that all belong to `graph`.
    fn is_feasible(&self, graph: &Graph, nodes: &NodeSet) -> bool;

    /// Objective value of a feasible solution.
    fn objective(&self, graph: &Graph, nodes: &NodeSet) -> i64;

    /// Binds the problem to `graph`.
    ///
    /// # Errors
    /// [`GraphinderError::DomainConsistency`] when already bound to another
    /// graph.
    fn initialize(&self, graph: Arc<Graph>) -> Result<()> {
        self.binding().bind(graph)
    }

    /// The bound graph, if any.
    fn graph(&self) -> Option<&Arc<Graph>> {
        self.binding().graph()
    }

    /// The bound graph, or an error when the problem is not initialized.
    fn bound_graph(&self) -> Result<&Arc<Graph>> {
        self.graph().ok_or_else(|| {
            GraphinderError::InvalidOperationState("problem is not bound to a graph".into())
        })
    }

    /// Whether `nodes` is a feasible solution on the bound graph.
    ///
    /// Nodes of any other graph make the solution incorrect, as does an
    /// unbound problem.
    fn is_solution_correct(&self, nodes: &NodeSet) -> bool {
        match self.graph() {
            Some(graph) => nodes.iter().all(|&n| graph.owns(n)) && self.is_feasible(graph, nodes),
            None => false,
        }
    }

    /// Decodes a genotype and checks it.
    ///
    /// # Errors
    /// Unbound problem, or a bit vector whose length differs from the node
    /// count.
    fn is_binary_solution_correct(&self, bits: &[bool]) -> Result<bool> {
        let nodes = self.bound_graph()?.binary_solution_as_nodes(bits)?;
        Ok(self.is_solution_correct(&nodes))
    }

    /// Objective of `nodes`, or [`Criteria::worst`] when infeasible.
    fn solution_outcome(&self, nodes: &NodeSet) -> i64 {
        match self.graph() {
            Some(graph) if self.is_solution_correct(nodes) => self.objective(graph, nodes),
            _ => self.criteria().worst(),
        }
    }

    /// Replaces the current solution with a correct one.
    ///
    /// # Errors
    /// - [`GraphinderError::InvalidOperationState`] when unbound
    /// - [`GraphinderError::DomainConsistency`] when `nodes` is not a
    ///   correct solution; the current solution is left unchanged
    fn set_new_solution(&self, nodes: NodeSet) -> Result<()> {
        self.bound_graph()?;
        if !self.is_solution_correct(&nodes) {
            return Err(GraphinderError::domain(
                "setting new solution",
                "proposed solution is not correct for the problem",
            ));
        }
        self.binding().replace(nodes);
        Ok(())
    }

    fn current_solution(&self) -> NodeSet {
        self.binding().solution()
    }

    fn current_outcome(&self) -> i64 {
        self.solution_outcome(&self.current_solution())
    }

    fn is_current_solution_correct(&self) -> bool {
        self.is_solution_correct(&self.current_solution())
    }
}
