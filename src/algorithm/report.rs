//! Progress reports, listener registry and stop requests.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Snapshot published after every search step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressReport {
    /// Step index (generation for GA, temperature step for SA).
    pub step: usize,

    /// Outcome of the best accepted solution so far.
    ///
    /// Equals [`Criteria::worst`](crate::problem::Criteria::worst) until a
    /// correct solution has been accepted.
    pub best_outcome: i64,

    /// Time spent in the run so far.
    pub processor_time_cost: Duration,

    /// Current temperature, for annealing-based algorithms.
    pub temperature: Option<f64>,
}

/// Handle returned by [`ProgressListeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ProgressReport) + Send>;

/// Registered progress callbacks.
///
/// Reports are delivered synchronously, in production order, to listeners
/// in registration order.
#[derive(Default)]
pub struct ProgressListeners {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl ProgressListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked with every subsequent report.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ProgressReport) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn publish(&mut self, report: &ProgressReport) {
        for (_, listener) in &mut self.listeners {
            listener(report);
        }
    }
}

impl fmt::Debug for ProgressListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressListeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}

/// Cloneable stop request flag.
///
/// The search loop observes it at the next iteration boundary; a step in
/// progress is not interrupted.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn report(step: usize) -> ProgressReport {
        ProgressReport {
            step,
            best_outcome: 0,
            processor_time_cost: Duration::ZERO,
            temperature: None,
        }
    }

    #[test]
    fn test_delivery_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = ProgressListeners::new();
        for name in ["first", "second"] {
            let log = Arc::clone(&log);
            listeners.subscribe(move |r| log.lock().unwrap().push((name, r.step)));
        }

        listeners.publish(&report(1));
        listeners.publish(&report(2));

        assert_eq!(
            *log.lock().unwrap(),
            vec![("first", 1), ("second", 1), ("first", 2), ("second", 2)]
        );
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let count = Arc::new(Mutex::new(0));
        let mut listeners = ProgressListeners::new();
        let counter = Arc::clone(&count);
        let id = listeners.subscribe(move |_| *counter.lock().unwrap() += 1);

        listeners.publish(&report(1));
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.publish(&report(2));

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_stop_handle_is_shared() {
        let handle = StopHandle::new();
        let clone = handle.clone();
        assert!(!handle.is_stop_requested());
        clone.stop();
        assert!(handle.is_stop_requested());
    }
}
