//! Error types shared by every component of the crate.

use thiserror::Error;

/// Errors raised by graphs, problems, genetic operators and algorithms.
///
/// Every error is fail-fast: the operation that returns it has not
/// modified any of its inputs. Mutating a locked graph or adding a
/// duplicate key is *not* an error; those calls are silent no-ops.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphinderError {
    /// A required input was missing.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The graph cannot be used for the requested operation
    /// (no nodes, or a bit vector whose length differs from the node count).
    #[error("invalid graph state: {0}")]
    InvalidGraphState(String),

    /// Graphs, problems or individuals that must match do not.
    #[error("{context}: {reason}")]
    DomainConsistency {
        /// Operation that detected the mismatch.
        context: &'static str,
        /// What did not match.
        reason: String,
    },

    /// The operation is not allowed in the component's current state.
    #[error("invalid operation state: {0}")]
    InvalidOperationState(String),

    /// Algorithm configuration rejected by its `validate` method.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GraphinderError {
    pub(crate) fn domain(context: &'static str, reason: impl Into<String>) -> Self {
        GraphinderError::DomainConsistency {
            context,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphinderError>;
