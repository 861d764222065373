//! Metaheuristic search for combinatorial graph problems.
//!
//! Provides two metaheuristics over a shared graph/problem abstraction:
//!
//! - **Genetic Algorithm (GA)**: Population-based evolutionary search over
//!   bit genotypes with pluggable selection, crossover, and mutation
//!   operators.
//! - **Simulated Annealing (SA)**: Single-solution trajectory search over
//!   node subsets with pluggable cooling schedules.
//!
//! # Architecture
//!
//! - [`graph`]: the undirected [`Graph`](graph::Graph) container, locked
//!   once search starts
//! - [`problem`]: the [`Problem`](problem::Problem) trait (feasibility and
//!   scoring), [`MinimumVertexCover`](problem::MinimumVertexCover) and the
//!   [`ProblemRegistry`](problem::ProblemRegistry)
//! - [`algorithm`]: the [`Algorithm`](algorithm::Algorithm) capability
//!   trait, the [`launch`](algorithm::launch) driver and progress reports
//! - [`ga`], [`sa`]: the two metaheuristics
//!
//! # Example
//!
//! ```
//! use graphinder::algorithm::{launch, Algorithm};
//! use graphinder::ga::{GaConfig, GeneticAlgorithm};
//! use graphinder::graph::Graph;
//! use graphinder::problem::{ProblemKind, ProblemRegistry};
//! use std::sync::Arc;
//!
//! let mut graph = Graph::with_seed(7);
//! graph.fill_randomly(20, 4);
//! let graph = Arc::new(graph);
//!
//! let problem = ProblemRegistry::default()
//!     .create(ProblemKind::MinimumVertexCover)
//!     .unwrap();
//! let mut ga = GeneticAlgorithm::new(Arc::clone(&graph), problem, GaConfig::default().with_seed(1))
//!     .unwrap();
//! launch(&mut ga).unwrap();
//!
//! assert!(graph.is_locked());
//! assert!(ga.problem().is_current_solution_correct());
//! ```
//!
//! # Features
//!
//! - `parallel`: build GA populations with rayon
//! - `serde`: serialization for records, reports and enums

pub mod algorithm;
pub mod error;
pub mod ga;
pub mod graph;
pub mod problem;
pub mod random;
pub mod sa;

pub use error::{GraphinderError, Result};
