//! Direction of optimization.

use std::cmp::Ordering;

/// Whether larger or smaller outcomes are preferred.
///
/// Every component that ranks candidates consults the criteria instead of
/// assuming a direction.
///
/// # Examples
///
/// ```
/// use graphinder::problem::Criteria;
///
/// let c = Criteria::SmallerIsBetter;
/// assert!(c.is_better(3, 5));
/// assert!(c.is_better(100, c.worst()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Criteria {
    BiggerIsBetter,
    SmallerIsBetter,
}

impl Criteria {
    /// Sentinel outcome of an infeasible solution.
    ///
    /// Never wins a comparison against a feasible outcome.
    pub fn worst(self) -> i64 {
        match self {
            Criteria::BiggerIsBetter => i64::MIN,
            Criteria::SmallerIsBetter => i64::MAX,
        }
    }

    /// Whether `candidate` is strictly better than `reference`.
    pub fn is_better(self, candidate: i64, reference: i64) -> bool {
        match self {
            Criteria::BiggerIsBetter => candidate > reference,
            Criteria::SmallerIsBetter => candidate < reference,
        }
    }

    /// Whether `candidate` is better than or equal to `reference`.
    pub fn is_at_least_as_good(self, candidate: i64, reference: i64) -> bool {
        candidate == reference || self.is_better(candidate, reference)
    }

    /// Orders outcomes best first.
    pub fn compare(self, a: i64, b: i64) -> Ordering {
        match self {
            Criteria::BiggerIsBetter => b.cmp(&a),
            Criteria::SmallerIsBetter => a.cmp(&b),
        }
    }

    /// How much worse `candidate` is than `current`.
    ///
    /// Positive for a worse candidate, zero or negative otherwise. Moving
    /// onto the infeasible sentinel is an infinite degradation; leaving it
    /// is an infinite improvement.
    pub fn degradation(self, current: i64, candidate: i64) -> f64 {
        let worst = self.worst();
        match (current == worst, candidate == worst) {
            (true, true) => 0.0,
            (false, true) => f64::INFINITY,
            (true, false) => f64::NEG_INFINITY,
            (false, false) => match self {
                Criteria::BiggerIsBetter => (current - candidate) as f64,
                Criteria::SmallerIsBetter => (candidate - current) as f64,
            },
        }
    }
}
