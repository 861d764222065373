//! Cooling strategies.
//!
//! A [`CoolingStrategy`] drives an [`Annealable`] system: it repeatedly
//! asks the system to anneal at its current temperature and then lowers
//! the temperature by its decay law, until the system reports it cannot
//! continue.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

use crate::error::Result;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// A system that can be cooled.
pub trait Annealable {
    /// Current temperature.
    fn temperature(&self) -> f64;

    /// Whether another cooling step should run.
    fn can_continue_cooling(&self) -> bool;

    /// Anneals at the current temperature, then moves to `next_temperature`.
    fn cooling_step(&mut self, next_temperature: f64) -> Result<()>;
}

/// Temperature decay law.
pub trait CoolingStrategy: Send + Sync + fmt::Debug {
    /// Temperature following `temperature`.
    fn next_temperature(&self, temperature: f64) -> f64;

    /// Cools `system` until it cannot continue. Returns the time spent.
    fn cool(&self, system: &mut dyn Annealable) -> Result<Duration> {
        let started = Instant::now();
        let mut steps = 0usize;
        while system.can_continue_cooling() {
            let next = self.next_temperature(system.temperature());
            system.cooling_step(next)?;
            steps += 1;
        }
        let elapsed = started.elapsed();
        debug!(
            steps,
            final_temperature = system.temperature(),
            elapsed_ms = elapsed.as_millis() as u64,
            "cooling finished"
        );
        Ok(elapsed)
    }
}

/// Built-in cooling schedules.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed decrement per step
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    ///
    /// Most widely used. Typical `alpha`: 0.90–0.99.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling: `T_{k+1} = max(T_k - decrement, 0)`.
    Linear {
        /// Temperature removed per step. Must be positive.
        decrement: f64,
    },

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// Cools fast at high T, slow at low T.
    LundyMees {
        /// Cooling parameter. Typically `(T_0 - T_min) / (steps * T_0 * T_min)`.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.95 }
    }
}

impl CoolingSchedule {
    /// Returns `Err` with a description when the parameter is out of range.
    pub fn validate(&self) -> std::result::Result<(), String> {
        match *self {
            CoolingSchedule::Geometric { alpha } => {
                if !(alpha > 0.0 && alpha < 1.0) {
                    return Err(format!("geometric alpha must be in (0, 1), got {alpha}"));
                }
            }
            CoolingSchedule::Linear { decrement } => {
                if !(decrement > 0.0 && decrement.is_finite()) {
                    return Err(format!("linear decrement must be positive and finite, got {decrement}"));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if !(beta > 0.0 && beta.is_finite()) {
                    return Err(format!("lundy-mees beta must be positive and finite, got {beta}"));
                }
            }
        }
        Ok(())
    }
}

impl CoolingStrategy for CoolingSchedule {
    fn next_temperature(&self, temperature: f64) -> f64 {
        match *self {
            CoolingSchedule::Geometric { alpha } => temperature * alpha,
            CoolingSchedule::Linear { decrement } => (temperature - decrement).max(0.0),
            CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every temperature it is cooled to.
    struct Probe {
        temperature: f64,
        floor: f64,
        visited: Vec<f64>,
    }

    impl Annealable for Probe {
        fn temperature(&self) -> f64 {
            self.temperature
        }
        fn can_continue_cooling(&self) -> bool {
            self.temperature > self.floor
        }
        fn cooling_step(&mut self, next_temperature: f64) -> Result<()> {
            self.temperature = next_temperature;
            self.visited.push(next_temperature);
            Ok(())
        }
    }

    fn probe(temperature: f64, floor: f64) -> Probe {
        Probe {
            temperature,
            floor,
            visited: Vec::new(),
        }
    }

    #[test]
    fn test_geometric_until_floor() {
        let mut system = probe(1.0, 0.1);
        CoolingSchedule::Geometric { alpha: 0.5 }.cool(&mut system).unwrap();
        assert_eq!(system.visited, vec![0.5, 0.25, 0.125, 0.0625]);
    }

    #[test]
    fn test_linear_never_negative() {
        let mut system = probe(1.0, 0.0);
        CoolingSchedule::Linear { decrement: 0.4 }.cool(&mut system).unwrap();
        assert_eq!(system.visited.len(), 3);
        assert_eq!(*system.visited.last().unwrap(), 0.0);
    }

    #[test]
    fn test_lundy_mees_decreasing() {
        let schedule = CoolingSchedule::LundyMees { beta: 0.01 };
        let mut t = 100.0;
        for _ in 0..100 {
            let next = schedule.next_temperature(t);
            assert!(next < t && next > 0.0);
            t = next;
        }
    }

    #[test]
    fn test_cool_stops_immediately_below_floor() {
        let mut system = probe(0.05, 0.1);
        CoolingSchedule::default().cool(&mut system).unwrap();
        assert!(system.visited.is_empty());
    }

    #[test]
    fn test_default_is_geometric() {
        assert_eq!(CoolingSchedule::default(), CoolingSchedule::Geometric { alpha: 0.95 });
    }

    #[test]
    fn test_validate() {
        assert!(CoolingSchedule::Geometric { alpha: 1.5 }.validate().is_err());
        assert!(CoolingSchedule::Linear { decrement: 0.0 }.validate().is_err());
        assert!(CoolingSchedule::LundyMees { beta: -1.0 }.validate().is_err());
        assert!(CoolingSchedule::Geometric { alpha: f64::NAN }.validate().is_err());
        assert!(CoolingSchedule::Linear { decrement: f64::NAN }.validate().is_err());
        assert!(CoolingSchedule::LundyMees { beta: f64::INFINITY }.validate().is_err());
        assert!(CoolingSchedule::Linear { decrement: 0.5 }.validate().is_ok());
    }
}
