//! GA generational loop.
//!
//! [`GeneticAlgorithm`] breeds generations of [`Individual`]s:
//! initialization → selection → crossover → mutation → repeat. The best
//! correct individual of every generation is offered to the problem.

use super::config::GaConfig;
use super::crossover::{CrossoverStrategy, OnePointCrossover};
use super::individual::Individual;
use super::mutation::{BinaryTransformationStrategy, MutationStrategy};
use super::selection::{RouletteStrategy, SelectionStrategy};
use crate::algorithm::{Algorithm, AlgorithmCore};
use crate::error::{GraphinderError, Result};
use crate::graph::{Graph, NodeSet};
use crate::problem::Problem;
use crate::random::{create_rng, fork, rng_from_option};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Operators used by the genetic algorithm.
pub struct GaStrategies {
    pub selection: Box<dyn SelectionStrategy>,
    pub crossover: Box<dyn CrossoverStrategy>,
    pub mutation: Box<dyn MutationStrategy>,
}

impl GaStrategies {
    /// Roulette selection, one-point crossover and the configured bit
    /// transformation, each with a generator forked from `rng`.
    ///
    /// # Errors
    /// [`GraphinderError::InvalidGraphState`] when the graph has no nodes.
    pub fn defaults(graph: &Graph, config: &GaConfig, rng: &mut StdRng) -> Result<Self> {
        Ok(Self {
            selection: Box::new(RouletteStrategy::new(fork(rng))),
            crossover: Box::new(OnePointCrossover::new(graph, rng)?),
            mutation: Box::new(BinaryTransformationStrategy::new(config.mutation, fork(rng))),
        })
    }
}

impl std::fmt::Debug for GaStrategies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaStrategies").finish_non_exhaustive()
    }
}

/// Genetic algorithm over bit genotypes.
///
/// # Usage
///
/// ```ignore
/// let graph = Arc::new(graph);
/// let problem = ProblemRegistry::default().create(ProblemKind::MinimumVertexCover)?;
/// let mut ga = GeneticAlgorithm::new(graph, problem, GaConfig::default().with_seed(42))?;
/// launch(&mut ga)?;
/// println!("best cover: {}", ga.current_outcome());
/// ```
#[derive(Debug)]
pub struct GeneticAlgorithm {
    core: AlgorithmCore,
    config: GaConfig,
    strategies: GaStrategies,
    rng: StdRng,
    generation: usize,
    stagnation: usize,
    best_history: Vec<i64>,
}

impl GeneticAlgorithm {
    /// Creates a GA with the default operators.
    ///
    /// # Errors
    /// - [`GraphinderError::InvalidGraphState`] when the graph has no nodes
    /// - [`GraphinderError::InvalidConfig`] when `config` fails validation
    /// - [`GraphinderError::DomainConsistency`] when the problem is bound to
    ///   another graph
    pub fn new(graph: Arc<Graph>, problem: Arc<dyn Problem>, config: GaConfig) -> Result<Self> {
        let core = AlgorithmCore::new(graph, problem)?;
        config.validate().map_err(GraphinderError::InvalidConfig)?;
        let mut rng = rng_from_option(config.seed);
        let strategies = GaStrategies::defaults(core.graph(), &config, &mut rng)?;
        Ok(Self::assemble(core, config, strategies, rng))
    }

    /// Creates a GA with caller-supplied operators.
    pub fn with_strategies(
        graph: Arc<Graph>,
        problem: Arc<dyn Problem>,
        config: GaConfig,
        strategies: GaStrategies,
    ) -> Result<Self> {
        let core = AlgorithmCore::new(graph, problem)?;
        config.validate().map_err(GraphinderError::InvalidConfig)?;
        let rng = rng_from_option(config.seed);
        Ok(Self::assemble(core, config, strategies, rng))
    }

    fn assemble(core: AlgorithmCore, config: GaConfig, strategies: GaStrategies, rng: StdRng) -> Self {
        let best_history = Vec::with_capacity(config.max_generations + 1);
        Self {
            core,
            config,
            strategies,
            rng,
            generation: 0,
            stagnation: 0,
            best_history,
        }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Generations bred so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The current population.
    pub fn population(&self) -> &[Individual] {
        self.strategies.selection.population()
    }

    /// Best accepted outcome after initialization and after each generation.
    pub fn best_history(&self) -> &[i64] {
        &self.best_history
    }

    fn initial_population(&mut self) -> Result<Vec<Individual>> {
        let (low, high) = self.config.initial_density;
        let seeds: Vec<(u64, f64)> = (0..self.config.population_size)
            .map(|_| (self.rng.random(), self.rng.random_range(low..=high)))
            .collect();

        let graph = self.core.graph();
        let problem = self.core.problem();
        let spawn = |&(seed, density): &(u64, f64)| {
            Individual::random(
                Arc::clone(graph),
                Arc::clone(problem),
                density,
                &mut create_rng(seed),
            )
        };
        spawn_all(&seeds, self.config.parallel, spawn)
    }

    /// Elites followed by offspring of selected couples.
    fn breed(&mut self) -> Result<Vec<Individual>> {
        let criteria = self.core.problem().criteria();
        let mut ranked = self.strategies.selection.population().to_vec();
        ranked.sort_by(|a, b| criteria.compare(a.outcome(), b.outcome()));
        ranked.truncate(self.config.elite_count());

        let mut next_gen = ranked;
        while next_gen.len() < self.config.population_size {
            let (left, right) = self.strategies.selection.next_couple()?;
            let mut child = if self.rng.random_bool(self.config.crossover_rate) {
                self.strategies.crossover.perform_crossover(left, right)?
            } else {
                left.clone()
            };
            if self.rng.random_bool(self.config.mutation_rate) {
                child = self.strategies.mutation.mutate(&child)?;
            }
            next_gen.push(child);
        }
        Ok(next_gen)
    }

    /// Offers the best correct individual of the population. Returns
    /// whether the problem's outcome improved.
    fn offer_population_best(&mut self) -> Result<bool> {
        let criteria = self.core.problem().criteria();
        let best: Option<NodeSet> = self
            .strategies
            .selection
            .population()
            .iter()
            .filter(|ind| ind.is_correct())
            .min_by(|a, b| criteria.compare(a.outcome(), b.outcome()))
            .map(Individual::solution);

        let before = self.current_outcome();
        if let Some(solution) = best {
            self.offer(solution)?;
        }
        let after = self.current_outcome();
        self.best_history.push(after);
        Ok(criteria.is_better(after, before))
    }

    fn time_limit_reached(&self) -> bool {
        self.config
            .time_limit_ms
            .is_some_and(|ms| self.processor_time_cost() >= Duration::from_millis(ms))
    }
}

impl Algorithm for GeneticAlgorithm {
    fn name(&self) -> &'static str {
        "genetic-algorithm"
    }

    fn core(&self) -> &AlgorithmCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AlgorithmCore {
        &mut self.core
    }

    fn can_accept_answer(&self, candidate: Option<&NodeSet>) -> Result<bool> {
        self.core.accepts(candidate)
    }

    fn can_continue_searching(&self) -> bool {
        if self.generation >= self.config.max_generations || self.time_limit_reached() {
            return false;
        }
        self.config.stagnation_limit == 0 || self.stagnation < self.config.stagnation_limit
    }

    fn initialize_search(&mut self) -> Result<()> {
        let population = self.initial_population()?;
        debug!(
            population = population.len(),
            correct = population.iter().filter(|ind| ind.is_correct()).count(),
            "initial population bred"
        );
        self.strategies.selection.set(population)?;
        self.offer_population_best()?;
        Ok(())
    }

    fn search_step(&mut self) -> Result<()> {
        let next_gen = self.breed()?;
        self.strategies.selection.set(next_gen)?;
        self.generation += 1;

        if self.offer_population_best()? {
            self.stagnation = 0;
        } else {
            self.stagnation += 1;
        }

        trace!(
            generation = self.generation,
            best = self.current_outcome(),
            stagnation = self.stagnation,
            "generation bred"
        );
        self.core.publish_progress(self.generation, None);
        Ok(())
    }
}

#[cfg(feature = "parallel")]
fn spawn_all<F>(seeds: &[(u64, f64)], parallel: bool, spawn: F) -> Result<Vec<Individual>>
where
    F: Fn(&(u64, f64)) -> Result<Individual> + Send + Sync,
{
    if parallel {
        seeds.par_iter().map(spawn).collect()
    } else {
        seeds.iter().map(spawn).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn spawn_all<F>(seeds: &[(u64, f64)], _parallel: bool, spawn: F) -> Result<Vec<Individual>>
where
    F: Fn(&(u64, f64)) -> Result<Individual>,
{
    seeds.iter().map(spawn).collect()
}
