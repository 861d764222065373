//! SA search over node subsets.

use super::config::SaConfig;
use super::cooling::{Annealable, CoolingStrategy};
use crate::algorithm::{Algorithm, AlgorithmCore};
use crate::error::{GraphinderError, Result};
use crate::graph::{Graph, NodeSet};
use crate::problem::Problem;
use crate::random::rng_from_option;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Simulated annealing over node subsets.
///
/// The walk starts from the full node set. A move toggles the membership
/// of one node drawn from [`Graph::random_node`]. Moves that are not worse
/// are always accepted; a move worse by `Δ` is accepted with probability
/// `exp(-Δ/T)` (Metropolis criterion), where `Δ` follows the problem's
/// [`Criteria`](crate::problem::Criteria). Moves onto infeasible subsets
/// are never accepted.
#[derive(Debug)]
pub struct SimulatedAnnealing {
    core: AlgorithmCore,
    config: SaConfig,
    cooling: Arc<dyn CoolingStrategy>,
    rng: StdRng,
    position: NodeSet,
    position_outcome: i64,
    temperature: f64,
    iterations: usize,
    temperature_steps: usize,
    accepted_moves: usize,
    improving_moves: usize,
    cooling_cost: Duration,
}

impl SimulatedAnnealing {
    /// Creates an SA cooled by `config.cooling`.
    ///
    /// # Errors
    /// - [`GraphinderError::InvalidGraphState`] when the graph has no nodes
    /// - [`GraphinderError::InvalidConfig`] when `config` fails validation
    /// - [`GraphinderError::DomainConsistency`] when the problem is bound to
    ///   another graph
    pub fn new(graph: Arc<Graph>, problem: Arc<dyn Problem>, config: SaConfig) -> Result<Self> {
        let cooling = Arc::new(config.cooling);
        Self::with_cooling_strategy(graph, problem, config, cooling)
    }

    /// Creates an SA cooled by a caller-supplied strategy.
    pub fn with_cooling_strategy(
        graph: Arc<Graph>,
        problem: Arc<dyn Problem>,
        config: SaConfig,
        cooling: Arc<dyn CoolingStrategy>,
    ) -> Result<Self> {
        let core = AlgorithmCore::new(graph, problem)?;
        config.validate().map_err(GraphinderError::InvalidConfig)?;
        let rng = rng_from_option(config.seed);
        let temperature = config.initial_temperature;
        let worst = core.problem().criteria().worst();
        Ok(Self {
            core,
            config,
            cooling,
            rng,
            position: NodeSet::new(),
            position_outcome: worst,
            temperature,
            iterations: 0,
            temperature_steps: 0,
            accepted_moves: 0,
            improving_moves: 0,
            cooling_cost: Duration::ZERO,
        })
    }

    pub fn config(&self) -> &SaConfig {
        &self.config
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Moves attempted so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn temperature_steps(&self) -> usize {
        self.temperature_steps
    }

    /// Accepted moves, including improving ones.
    pub fn accepted_moves(&self) -> usize {
        self.accepted_moves
    }

    pub fn improving_moves(&self) -> usize {
        self.improving_moves
    }

    /// Time spent inside the cooling strategy.
    pub fn cooling_cost(&self) -> Duration {
        self.cooling_cost
    }

    /// The walk's current subset, which may be worse than the best accepted.
    pub fn position(&self) -> &NodeSet {
        &self.position
    }

    fn budget_exhausted(&self) -> bool {
        self.config.max_iterations > 0 && self.iterations >= self.config.max_iterations
    }

    /// One Metropolis move at the current temperature.
    fn anneal_move(&mut self) -> Result<()> {
        self.iterations += 1;
        let Some(node) = self.core.graph().random_node() else {
            return Ok(());
        };
        let toggled = node.id();

        let mut candidate = self.position.clone();
        if !candidate.remove(&toggled) {
            candidate.insert(toggled);
        }

        let problem = self.core.problem();
        let criteria = problem.criteria();
        let outcome = problem.solution_outcome(&candidate);
        let delta = criteria.degradation(self.position_outcome, outcome);

        let accept = if delta <= 0.0 {
            if delta < 0.0 {
                self.improving_moves += 1;
            }
            true
        } else {
            let probability = (-delta / self.temperature).exp();
            self.rng.random::<f64>() < probability
        };
        if !accept {
            return Ok(());
        }

        self.position = candidate;
        self.position_outcome = outcome;
        self.accepted_moves += 1;

        if criteria.is_better(outcome, self.current_outcome()) {
            self.offer(self.position.clone())?;
        }
        Ok(())
    }
}

impl Annealable for SimulatedAnnealing {
    fn temperature(&self) -> f64 {
        self.temperature
    }

    fn can_continue_cooling(&self) -> bool {
        !self.core.is_stop_requested() && Algorithm::can_continue_searching(self)
    }

    fn cooling_step(&mut self, next_temperature: f64) -> Result<()> {
        for _ in 0..self.config.moves_per_step() {
            if self.budget_exhausted() {
                break;
            }
            self.anneal_move()?;
        }
        self.temperature = next_temperature;
        self.temperature_steps += 1;

        trace!(
            step = self.temperature_steps,
            temperature = self.temperature,
            position = self.position_outcome,
            best = self.current_outcome(),
            "temperature step"
        );
        self.core
            .publish_progress(self.temperature_steps, Some(self.temperature));
        Ok(())
    }
}

impl Algorithm for SimulatedAnnealing {
    fn name(&self) -> &'static str {
        "simulated-annealing"
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
        self.temperature > self.config.min_temperature && !self.budget_exhausted()
    }

    fn initialize_search(&mut self) -> Result<()> {
        self.position = self.core.graph().all_nodes();
        self.position_outcome = self.core.problem().solution_outcome(&self.position);
        self.temperature = self.config.initial_temperature;
        if self.core.problem().is_solution_correct(&self.position) {
            self.offer(self.position.clone())?;
        }
        Ok(())
    }

    fn search_step(&mut self) -> Result<()> {
        let cooling = Arc::clone(&self.cooling);
        let cost = cooling.cool(self)?;
        self.cooling_cost += cost;
        Ok(())
    }
}
