//! Selection strategies for the GA.
//!
//! Selection determines which individuals are chosen as parents for
//! crossover.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::individual::Individual;
use crate::error::{GraphinderError, Result};
use crate::problem::Criteria;
use rand::rngs::StdRng;
use rand::Rng;

/// Chooses parents from a population.
pub trait SelectionStrategy: Send {
    /// Replaces the working population.
    ///
    /// # Errors
    /// [`GraphinderError::DomainConsistency`] when the individuals do not
    /// all share the same graph and problem; the previous population is
    /// kept.
    fn set(&mut self, population: Vec<Individual>) -> Result<()>;

    /// The current working population.
    fn population(&self) -> &[Individual];

    /// Draws one individual.
    ///
    /// # Errors
    /// [`GraphinderError::InvalidOperationState`] when the population is
    /// empty.
    fn next(&mut self) -> Result<&Individual>;

    /// Draws two distinct members of the population.
    ///
    /// # Errors
    /// [`GraphinderError::InvalidOperationState`] when the population has
    /// fewer than two individuals.
    fn next_couple(&mut self) -> Result<(&Individual, &Individual)>;
}

/// Fitness-proportionate (roulette wheel) selection.
///
/// Each individual's share of the wheel is its fitness weight divided by
/// the population total, accumulated in population order. A draw `u` in
/// `[0, 1)` selects the first individual whose cumulative mass exceeds `u`.
///
/// Weights follow the population's [`Criteria`]:
/// - `BiggerIsBetter`: the outcome itself (negative outcomes weigh zero)
/// - `SmallerIsBetter`: `max_outcome - outcome + 1` over correct individuals
///
/// Incorrect individuals weigh zero. If every weight is zero the wheel is
/// uniform.
///
/// # Complexity
/// O(n) per `set`, O(n) per draw
#[derive(Debug)]
pub struct RouletteStrategy {
    rng: StdRng,
    population: Vec<Individual>,
    shares: Vec<f64>,
    cumulative: Vec<f64>,
}

impl RouletteStrategy {
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng,
            population: Vec::new(),
            shares: Vec::new(),
            cumulative: Vec::new(),
        }
    }

    /// Cumulative probability mass, in population order.
    ///
    /// The last entry is 1 within floating-point tolerance.
    pub fn probabilities(&self) -> &[f64] {
        &self.cumulative
    }

    /// Selection probability of each individual.
    pub fn shares(&self) -> &[f64] {
        &self.shares
    }

    fn rebuild_wheel(&mut self) {
        let weights = fitness_weights(&self.population);
        let total: f64 = weights.iter().sum();
        let n = weights.len();

        self.shares = if total > 0.0 {
            weights.iter().map(|w| w / total).collect()
        } else {
            vec![1.0 / n as f64; n]
        };

        let mut running = 0.0;
        self.cumulative = self
            .shares
            .iter()
            .map(|share| {
                running += share;
                running
            })
            .collect();
    }

    fn draw_index(&mut self) -> usize {
        let threshold: f64 = self.rng.random();
        self.cumulative
            .iter()
            .position(|&mass| mass > threshold)
            .unwrap_or(self.cumulative.len() - 1) // floating-point fallback
    }

    /// Draws from the wheel with `excluded` removed.
    fn draw_index_excluding(&mut self, excluded: usize) -> usize {
        let n = self.shares.len();
        let remaining = 1.0 - self.shares[excluded];
        if remaining <= f64::EPSILON {
            let pick = self.rng.random_range(0..n - 1);
            return if pick >= excluded { pick + 1 } else { pick };
        }

        let threshold = self.rng.random::<f64>() * remaining;
        let mut running = 0.0;
        let mut last = None;
        for (i, &share) in self.shares.iter().enumerate() {
            if i == excluded {
                continue;
            }
            running += share;
            if share > 0.0 {
                last = Some(i);
            }
            if running > threshold && share > 0.0 {
                return i;
            }
        }
        last.unwrap_or(if excluded == 0 { 1 } else { 0 })
    }
}

impl SelectionStrategy for RouletteStrategy {
    fn set(&mut self, population: Vec<Individual>) -> Result<()> {
        if let Some(first) = population.first() {
            if population.iter().any(|i| !first.same_graph(i)) {
                return Err(GraphinderError::domain(
                    "setting selection population",
                    "individuals represent solutions for different graphs",
                ));
            }
            if population.iter().any(|i| !first.same_problem(i)) {
                return Err(GraphinderError::domain(
                    "setting selection population",
                    "individuals represent solutions for different problems",
                ));
            }
        }
        self.population = population;
        self.rebuild_wheel();
        Ok(())
    }

    fn population(&self) -> &[Individual] {
        &self.population
    }

    fn next(&mut self) -> Result<&Individual> {
        if self.population.is_empty() {
            return Err(GraphinderError::InvalidOperationState(
                "selection strategy needs a non-empty population".into(),
            ));
        }
        let index = self.draw_index();
        Ok(&self.population[index])
    }

    fn next_couple(&mut self) -> Result<(&Individual, &Individual)> {
        if self.population.len() < 2 {
            return Err(GraphinderError::InvalidOperationState(format!(
                "selecting a couple needs at least 2 individuals, population has {}",
                self.population.len()
            )));
        }
        let first = self.draw_index();
        let second = self.draw_index_excluding(first);
        Ok((&self.population[first], &self.population[second]))
    }
}

/// Non-negative, bigger-is-better weight per individual.
fn fitness_weights(population: &[Individual]) -> Vec<f64> {
    let Some(first) = population.first() else {
        return Vec::new();
    };
    match first.criteria() {
        Criteria::BiggerIsBetter => population
            .iter()
            .map(|ind| {
                if ind.is_correct() {
                    ind.outcome().max(0) as f64
                } else {
                    0.0
                }
            })
            .collect(),
        Criteria::SmallerIsBetter => {
            let max_outcome = population
                .iter()
                .filter(|ind| ind.is_correct())
                .map(Individual::outcome)
                .max()
                .unwrap_or(0);
            population
                .iter()
                .map(|ind| {
                    if ind.is_correct() {
                        (max_outcome - ind.outcome() + 1) as f64
                    } else {
                        0.0
                    }
                })
                .collect()
        }
    }
}
