//! Graph optimization problems.
//!
//! A [`Problem`] is bound to exactly one graph, decides whether a node set
//! is a correct solution, scores it, and keeps the best accepted solution.
//!
//! # Key Types
//!
//! - [`Problem`]: feasibility, objective and solution bookkeeping
//! - [`Criteria`]: whether bigger or smaller outcomes win
//! - [`MinimumVertexCover`]: the built-in problem
//! - [`ProblemRegistry`]: explicit kind → factory lookup

mod criteria;
mod registry;
mod types;
mod vertex_cover;

pub use criteria::Criteria;
pub use registry::{ProblemFactory, ProblemKind, ProblemRegistry};
pub use types::{Problem, ProblemBinding};
pub use vertex_cover::MinimumVertexCover;
