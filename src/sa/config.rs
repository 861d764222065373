//! SA configuration.

use super::cooling::CoolingSchedule;

/// Configuration for simulated annealing.
///
/// # Examples
///
/// ```
/// use graphinder::sa::{CoolingSchedule, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(0.001)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.98 })
///     .with_iterations_per_temperature(200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Minimum temperature. The search stops once T is at or below it.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Number of moves at each temperature level.
    ///
    /// For `LundyMees`, this is ignored (1 move per temperature).
    pub iterations_per_temperature: usize,

    /// Maximum total moves (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 10.0,
            min_temperature: 1e-3,
            cooling: CoolingSchedule::default(),
            iterations_per_temperature: 100,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Moves attempted per temperature step.
    pub fn moves_per_step(&self) -> usize {
        match self.cooling {
            CoolingSchedule::LundyMees { .. } => 1,
            _ => self.iterations_per_temperature,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
            return Err("initial_temperature must be positive and finite".into());
        }
        if !(self.min_temperature > 0.0) {
            return Err("min_temperature must be positive".into());
        }
        if !(self.min_temperature < self.initial_temperature) {
            return Err("min_temperature must be less than initial_temperature".into());
        }
        if self.moves_per_step() == 0 {
            return Err("iterations_per_temperature must be at least 1".into());
        }
        self.cooling.validate()
    }
}
