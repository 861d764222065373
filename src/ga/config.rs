//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use super::mutation::BinaryTransformation;

/// Configuration for the genetic algorithm.
///
/// # Defaults
///
/// ```
/// use graphinder::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 20);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use graphinder::ga::{BinaryTransformation, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(120)
///     .with_max_generations(200)
///     .with_mutation(BinaryTransformation::AllBitFlip)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of individuals bred in every generation.
    pub population_size: usize,

    /// Number of generations bred before the search stops.
    pub max_generations: usize,

    /// Probability that a selected couple is crossed (0.0, 1.0].
    ///
    /// When crossover is skipped the left parent is copied.
    pub crossover_rate: f64,

    /// Probability that an offspring is mutated (0.0, 1.0].
    pub mutation_rate: f64,

    /// Fraction of each generation copied unchanged into the next (0.0–1.0).
    pub elite_ratio: f64,

    /// Range of bit densities for the initial population.
    ///
    /// Each initial individual draws a density `d` uniformly from this
    /// range, then sets each bit with probability `d`. Dense genotypes are
    /// more likely to be correct covers.
    pub initial_density: (f64, f64),

    /// Bit transformation used by the default mutation strategy.
    pub mutation: BinaryTransformation,

    /// Generations without a better correct individual before stopping.
    ///
    /// Set to 0 to disable (the default).
    pub stagnation_limit: usize,

    /// Whether to build the initial population in parallel using rayon.
    ///
    /// Only honoured with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked before every generation, so a run may exceed it by one
    /// generation's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 20,
            crossover_rate: 0.5,
            mutation_rate: 0.1,
            elite_ratio: 0.1,
            initial_density: (0.5, 1.0),
            mutation: BinaryTransformation::RandomBitFlip,
            stagnation_limit: 0,
            parallel: false,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate, clamped to [0, 1].
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate, clamped to [0, 1].
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the elite ratio, clamped to [0, 1].
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the initial density range; bounds are clamped to [0, 1] and
    /// ordered.
    pub fn with_initial_density(mut self, low: f64, high: f64) -> Self {
        let (low, high) = (low.clamp(0.0, 1.0), high.clamp(0.0, 1.0));
        self.initial_density = if low <= high { (low, high) } else { (high, low) };
        self
    }

    pub fn with_mutation(mut self, kind: BinaryTransformation) -> Self {
        self.mutation = kind;
        self
    }

    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Number of elites carried into each generation.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_ratio) as usize
    }

    /// Sizes population and generation budget from the node count.
    ///
    /// - `nodes < 50`: 50 individuals, 50 generations
    /// - `50 <= nodes < 200`: 100 individuals, 150 generations
    /// - `nodes >= 200`: 150 individuals, 300 generations
    pub fn for_graph_size(nodes: usize) -> Self {
        let (population_size, max_generations) = match nodes {
            0..=49 => (50, 50),
            50..=199 => (100, 150),
            _ => (150, 300),
        };
        Self {
            population_size,
            max_generations,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if !(self.crossover_rate > 0.0 && self.crossover_rate <= 1.0) {
            return Err("crossover_rate must be in (0, 1]".into());
        }
        if !(self.mutation_rate > 0.0 && self.mutation_rate <= 1.0) {
            return Err("mutation_rate must be in (0, 1]".into());
        }
        if !(0.0..=1.0).contains(&self.elite_ratio) {
            return Err("elite_ratio must be in [0, 1]".into());
        }
        if self.elite_count() >= self.population_size {
            return Err("elite_ratio too high: elites fill entire population".into());
        }
        let (low, high) = self.initial_density;
        if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || !(low <= high) {
            return Err("initial_density must be an ordered range within [0, 1]".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_generations, 20);
        assert!((config.crossover_rate - 0.5).abs() < 1e-10);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert_eq!(config.elite_count(), 5);
        assert_eq!(config.mutation, BinaryTransformation::RandomBitFlip);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_max_generations(1000)
            .with_elite_ratio(0.2)
            .with_crossover_rate(0.8)
            .with_mutation_rate(0.05)
            .with_initial_density(0.9, 0.6)
            .with_stagnation_limit(30)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.elite_count(), 40);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.initial_density, (0.6, 0.9));
        assert_eq!(config.stagnation_limit, 30);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_clamp_rates() {
        let config = GaConfig::default()
            .with_elite_ratio(1.5)
            .with_crossover_rate(-0.5)
            .with_mutation_rate(2.0);

        assert!((config.elite_ratio - 1.0).abs() < 1e-10);
        assert!((config.crossover_rate - 0.0).abs() < 1e-10);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_validate_population_too_small() {
        assert!(GaConfig::default().with_population_size(1).validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        assert!(GaConfig::default().with_max_generations(0).validate().is_err());
    }

    #[test]
    fn test_validate_zero_rates() {
        assert!(GaConfig::default().with_crossover_rate(0.0).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(0.0).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nan() {
        assert!(GaConfig::default().with_crossover_rate(f64::NAN).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(f64::NAN).validate().is_err());
        assert!(GaConfig::default().with_elite_ratio(f64::NAN).validate().is_err());
        assert!(GaConfig::default()
            .with_initial_density(f64::NAN, 0.8)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_elite_too_high() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_ratio(1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_time_limit() {
        assert!(GaConfig::default().with_time_limit_ms(0).validate().is_err());
        assert!(GaConfig::default().with_time_limit_ms(1).validate().is_ok());
    }

    #[test]
    fn test_for_graph_size_boundaries() {
        assert_eq!(GaConfig::for_graph_size(49).population_size, 50);
        assert_eq!(GaConfig::for_graph_size(50).population_size, 100);
        assert_eq!(GaConfig::for_graph_size(199).max_generations, 150);
        assert_eq!(GaConfig::for_graph_size(200).population_size, 150);
        assert!(GaConfig::for_graph_size(1000).validate().is_ok());
    }
}
