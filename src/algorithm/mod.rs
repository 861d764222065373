//! Algorithm execution template.
//!
//! An [`Algorithm`] exposes an acceptance policy, a stopping condition and
//! a single search step. The free function [`launch`] sequences them:
//! it locks the graph, initializes the search and steps until the
//! algorithm stops or a stop is requested through a [`StopHandle`].
//!
//! Progress is published as [`ProgressReport`]s to callbacks registered in
//! [`ProgressListeners`].

mod driver;
mod report;

pub use driver::{launch, Algorithm, AlgorithmCore, AlgorithmState};
pub use report::{ListenerId, ProgressListeners, ProgressReport, StopHandle};
