//! The algorithm capability trait and the driver that runs it.

use super::report::{ListenerId, ProgressListeners, ProgressReport, StopHandle};
use crate::error::{GraphinderError, Result};
use crate::graph::{Graph, NodeSet};
use crate::problem::Problem;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Lifecycle of an algorithm instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmState {
    Constructed,
    Running,
    Terminated,
}

/// State every algorithm carries: the graph/problem pair, lifecycle,
/// progress listeners, stop flag and timing.
#[derive(Debug)]
pub struct AlgorithmCore {
    graph: Arc<Graph>,
    problem: Arc<dyn Problem>,
    state: AlgorithmState,
    listeners: ProgressListeners,
    stop: StopHandle,
    started: Option<Instant>,
    elapsed: Duration,
}

impl AlgorithmCore {
    /// Validates the graph and binds the problem to it.
    ///
    /// # Errors
    /// - [`GraphinderError::InvalidGraphState`] when the graph has no nodes
    /// - [`GraphinderError::DomainConsistency`] when the problem is already
    ///   bound to another graph
    pub fn new(graph: Arc<Graph>, problem: Arc<dyn Problem>) -> Result<Self> {
        if !graph.is_valid() {
            return Err(GraphinderError::InvalidGraphState(
                "graph has no nodes".into(),
            ));
        }
        problem.initialize(Arc::clone(&graph))?;
        Ok(Self {
            graph,
            problem,
            state: AlgorithmState::Constructed,
            listeners: ProgressListeners::new(),
            stop: StopHandle::new(),
            started: None,
            elapsed: Duration::ZERO,
        })
    }

    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    pub fn problem(&self) -> &Arc<dyn Problem> {
        &self.problem
    }

    pub fn state(&self) -> AlgorithmState {
        self.state
    }

    pub fn listeners_mut(&mut self) -> &mut ProgressListeners {
        &mut self.listeners
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop.is_stop_requested()
    }

    /// Time spent running; frozen once the run terminates.
    pub fn processor_time_cost(&self) -> Duration {
        match self.started {
            Some(started) if self.state == AlgorithmState::Running => {
                self.elapsed + started.elapsed()
            }
            _ => self.elapsed,
        }
    }

    /// Default acceptance policy: the candidate must be correct and at
    /// least as good as the current solution (any correct candidate beats
    /// an incorrect current solution).
    ///
    /// # Errors
    /// [`GraphinderError::InvalidArgument`] when no candidate is given.
    pub fn accepts(&self, candidate: Option<&NodeSet>) -> Result<bool> {
        let candidate = candidate.ok_or_else(|| {
            GraphinderError::InvalidArgument("no candidate solution was given".into())
        })?;
        if !self.problem.is_solution_correct(candidate) {
            return Ok(false);
        }
        if !self.problem.is_current_solution_correct() {
            return Ok(true);
        }
        let criteria = self.problem.criteria();
        Ok(criteria.is_at_least_as_good(
            self.problem.solution_outcome(candidate),
            self.problem.current_outcome(),
        ))
    }

    /// Publishes a report built from the problem's current outcome.
    pub fn publish_progress(&mut self, step: usize, temperature: Option<f64>) {
        if self.listeners.is_empty() {
            return;
        }
        let report = ProgressReport {
            step,
            best_outcome: self.problem.current_outcome(),
            processor_time_cost: self.processor_time_cost(),
            temperature,
        };
        self.listeners.publish(&report);
    }

    fn begin(&mut self) -> Result<()> {
        if self.state != AlgorithmState::Constructed {
            return Err(GraphinderError::InvalidOperationState(format!(
                "algorithm cannot be launched from state {:?}",
                self.state
            )));
        }
        self.state = AlgorithmState::Running;
        self.graph.lock();
        self.started = Some(Instant::now());
        Ok(())
    }

    fn finish(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed += started.elapsed();
        }
        self.state = AlgorithmState::Terminated;
    }
}

/// A search algorithm over a graph/problem pair.
///
/// Implementors supply the acceptance policy, the stopping condition and
/// one step of search; [`launch`] sequences them.
pub trait Algorithm {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn core(&self) -> &AlgorithmCore;

    fn core_mut(&mut self) -> &mut AlgorithmCore;

    /// Whether `candidate` should replace the problem's current solution.
    ///
    /// # Errors
    /// [`GraphinderError::InvalidArgument`] when `candidate` is `None`.
    fn can_accept_answer(&self, candidate: Option<&NodeSet>) -> Result<bool>;

    /// Stopping condition, checked before every step.
    fn can_continue_searching(&self) -> bool;

    /// Performs one step of search.
    fn search_step(&mut self) -> Result<()>;

    /// Called once per run, after the graph is locked and before the first
    /// step. The default does nothing.
    fn initialize_search(&mut self) -> Result<()> {
        Ok(())
    }

    fn graph(&self) -> &Arc<Graph> {
        self.core().graph()
    }

    fn problem(&self) -> &Arc<dyn Problem> {
        self.core().problem()
    }

    fn state(&self) -> AlgorithmState {
        self.core().state()
    }

    /// Best accepted solution.
    fn current_solution(&self) -> NodeSet {
        self.problem().current_solution()
    }

    /// Outcome of the best accepted solution.
    fn current_outcome(&self) -> i64 {
        self.problem().current_outcome()
    }

    fn processor_time_cost(&self) -> Duration {
        self.core().processor_time_cost()
    }

    fn listeners(&mut self) -> &mut ProgressListeners {
        self.core_mut().listeners_mut()
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners().unsubscribe(id)
    }

    fn stop_handle(&self) -> StopHandle {
        self.core().stop_handle()
    }

    /// Offers `candidate` to the problem if the acceptance policy allows
    /// it. Returns whether it was accepted.
    fn offer(&mut self, candidate: NodeSet) -> Result<bool> {
        if !self.can_accept_answer(Some(&candidate))? {
            return Ok(false);
        }
        self.problem().set_new_solution(candidate)?;
        debug!(
            algorithm = self.name(),
            outcome = self.current_outcome(),
            "accepted new solution"
        );
        Ok(true)
    }
}

/// Runs an algorithm to completion.
///
/// Locks the graph, runs [`Algorithm::initialize_search`], then repeats
/// [`Algorithm::search_step`] while the algorithm can continue and no stop
/// was requested. The algorithm ends up `Terminated` even when a step
/// fails.
///
/// # Errors
/// - [`GraphinderError::InvalidOperationState`] when the algorithm was
///   already launched
/// - any error raised by the algorithm's steps
pub fn launch<A: Algorithm + ?Sized>(algorithm: &mut A) -> Result<()> {
    algorithm.core_mut().begin()?;
    info!(
        algorithm = algorithm.name(),
        nodes = algorithm.graph().total_nodes(),
        edges = algorithm.graph().total_edges(),
        "search started"
    );

    let result = run(algorithm);
    algorithm.core_mut().finish();

    match &result {
        Ok(()) => info!(
            algorithm = algorithm.name(),
            outcome = algorithm.current_outcome(),
            elapsed_ms = algorithm.processor_time_cost().as_millis() as u64,
            stopped = algorithm.core().is_stop_requested(),
            "search finished"
        ),
        Err(e) => info!(algorithm = algorithm.name(), error = %e, "search failed"),
    }
    result
}

fn run<A: Algorithm + ?Sized>(algorithm: &mut A) -> Result<()> {
    algorithm.initialize_search()?;
    while !algorithm.core().is_stop_requested() && algorithm.can_continue_searching() {
        algorithm.search_step()?;
    }
    Ok(())
}
