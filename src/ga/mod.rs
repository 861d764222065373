//! Genetic algorithm over bit genotypes.
//!
//! Each [`Individual`] encodes a node subset as one bit per graph node.
//! Generations are bred from pluggable operators:
//!
//! - [`SelectionStrategy`]: [`RouletteStrategy`] (fitness-proportionate)
//! - [`CrossoverStrategy`]: [`OnePointCrossover`]
//! - [`MutationStrategy`]: [`BinaryTransformationStrategy`] with a
//!   [`BinaryTransformation`]
//!
//! # Key Types
//!
//! - [`GaConfig`]: algorithm parameters (population size, rates, budget)
//! - [`GeneticAlgorithm`]: the generational loop, run through
//!   [`launch`](crate::algorithm::launch)
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod crossover;
mod individual;
mod mutation;
mod runner;
mod selection;

pub use config::GaConfig;
pub use crossover::{CrossoverStrategy, OnePointCrossover};
pub use individual::Individual;
pub use mutation::{
    all_bit_flip, random_bit_flip, BinaryTransformation, BinaryTransformationStrategy,
    MutationStrategy,
};
pub use runner::{GaStrategies, GeneticAlgorithm};
pub use selection::{RouletteStrategy, SelectionStrategy};
