//! Crossover strategies for bit genotypes.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 3

use super::individual::Individual;
use crate::error::{GraphinderError, Result};
use crate::graph::Graph;
use rand::Rng;

/// Combines two parents into one offspring.
pub trait CrossoverStrategy: Send {
    /// Produces an offspring from `left` and `right`.
    ///
    /// # Errors
    /// [`GraphinderError::DomainConsistency`] when the parents are the same
    /// instance, belong to different graphs or problems, or have different
    /// genotype lengths.
    fn perform_crossover(&mut self, left: &Individual, right: &Individual) -> Result<Individual>;
}

/// One-point crossover with a point fixed at construction.
///
/// The offspring takes `left[..point]` followed by `right[point..]`.
///
/// # Algorithm
///
/// 1. Draw `u` uniformly in `[0, 1)` until `min_fraction <= u <= max_fraction`
/// 2. `point = floor(u * genome_len)`, clamped to `genome_len - 1`
///
/// # Complexity
/// O(n) per crossover
#[derive(Debug, Clone)]
pub struct OnePointCrossover {
    point: usize,
    genome_len: usize,
}

impl OnePointCrossover {
    /// Default band for the crossover point, as fractions of the genome.
    pub const DEFAULT_BAND: (f64, f64) = (0.2, 0.8);

    /// Creates a crossover for genomes of `graph`'s size, with the point
    /// drawn from [`DEFAULT_BAND`](Self::DEFAULT_BAND).
    ///
    /// # Errors
    /// [`GraphinderError::InvalidGraphState`] when the graph has no nodes.
    pub fn new<R: Rng>(graph: &Graph, rng: &mut R) -> Result<Self> {
        let (min, max) = Self::DEFAULT_BAND;
        Self::with_band(graph, min, max, rng)
    }

    /// Creates a crossover whose point lies in `[min_fraction, max_fraction]`
    /// of the genome.
    ///
    /// # Errors
    /// - [`GraphinderError::InvalidGraphState`] when the graph has no nodes
    /// - [`GraphinderError::InvalidArgument`] when the band is not an
    ///   ordered sub-range of `[0, 1]` starting below 1
    pub fn with_band<R: Rng>(
        graph: &Graph,
        min_fraction: f64,
        max_fraction: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if !graph.is_valid() {
            return Err(GraphinderError::InvalidGraphState(
                "crossover needs a graph with at least one node".into(),
            ));
        }
        if !(0.0..1.0).contains(&min_fraction)
            || !(max_fraction >= min_fraction && max_fraction <= 1.0)
        {
            return Err(GraphinderError::InvalidArgument(format!(
                "invalid crossover band [{min_fraction}, {max_fraction}]"
            )));
        }

        let fraction = rng.random_range(min_fraction..=max_fraction);

        let genome_len = graph.total_nodes();
        let point = ((fraction * genome_len as f64) as usize).min(genome_len - 1);
        Ok(Self { point, genome_len })
    }

    /// Index of the first bit taken from the right parent.
    pub fn crossover_point(&self) -> usize {
        self.point
    }

    pub fn genome_len(&self) -> usize {
        self.genome_len
    }
}

impl CrossoverStrategy for OnePointCrossover {
    fn perform_crossover(&mut self, left: &Individual, right: &Individual) -> Result<Individual> {
        const CONTEXT: &str = "performing crossover";

        if std::ptr::eq(left, right) {
            return Err(GraphinderError::domain(
                CONTEXT,
                "an individual cannot be crossed with itself",
            ));
        }
        if !left.same_graph(right) {
            return Err(GraphinderError::domain(
                CONTEXT,
                "parents represent solutions for different graphs",
            ));
        }
        if !left.same_problem(right) {
            return Err(GraphinderError::domain(
                CONTEXT,
                "parents represent solutions for different problems",
            ));
        }
        if left.len() != right.len() {
            return Err(GraphinderError::domain(
                CONTEXT,
                format!(
                    "parent genotypes differ in length ({} vs {})",
                    left.len(),
                    right.len()
                ),
            ));
        }

        let point = self.point.min(left.len());
        let genotype: Vec<bool> = left.genotype()[..point]
            .iter()
            .chain(&right.genotype()[point..])
            .copied()
            .collect();
        left.with_genotype(genotype)
    }
}
