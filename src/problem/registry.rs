//! Resolution of problem kinds to concrete problems.

use super::types::Problem;
use super::vertex_cover::MinimumVertexCover;
use crate::error::{GraphinderError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Tag selecting a problem type, as stored by external collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProblemKind {
    MinimumVertexCover,
}

/// Builds a fresh, unbound problem.
pub type ProblemFactory = fn() -> Arc<dyn Problem>;

/// Maps [`ProblemKind`]s to factories.
///
/// Constructed once by the caller and passed by reference to whatever
/// needs to resolve a problem.
///
/// # Examples
///
/// ```
/// use graphinder::problem::{ProblemKind, ProblemRegistry};
///
/// let registry = ProblemRegistry::default();
/// let problem = registry.create(ProblemKind::MinimumVertexCover).unwrap();
/// assert_eq!(problem.kind(), ProblemKind::MinimumVertexCover);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemRegistry {
    factories: HashMap<ProblemKind, ProblemFactory>,
}

impl Default for ProblemRegistry {
    /// Registry with every built-in problem.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(ProblemKind::MinimumVertexCover, minimum_vertex_cover);
        registry
    }
}

fn minimum_vertex_cover() -> Arc<dyn Problem> {
    Arc::new(MinimumVertexCover::new())
}

impl ProblemRegistry {
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers (or replaces) the factory for `kind`.
    pub fn register(&mut self, kind: ProblemKind, factory: ProblemFactory) -> &mut Self {
        self.factories.insert(kind, factory);
        self
    }

    pub fn contains(&self, kind: ProblemKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Creates a new, unbound problem of the given kind.
    pub fn create(&self, kind: ProblemKind) -> Result<Arc<dyn Problem>> {
        self.factories
            .get(&kind)
            .map(|factory| factory())
            .ok_or_else(|| {
                GraphinderError::InvalidArgument(format!("no factory registered for {kind:?}"))
            })
    }
}
