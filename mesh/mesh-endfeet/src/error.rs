//! Error types for endfeet reconstruction.

use thiserror::Error;

use crate::field::GroupId;

/// Result type for endfeet operations.
pub type EndfeetResult<T> = Result<T, EndfeetError>;

/// Errors raised at the pipeline boundary.
///
/// All validation happens before any reconstruction starts; the lazy
/// iterator itself never fails mid-stream.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EndfeetError {
    /// Parallel arrays disagree in length.
    #[error("{what}: expected {expected} entries, got {actual}")]
    CountMismatch {
        /// What was being validated.
        what: &'static str,
        /// Expected number of entries.
        expected: usize,
        /// Actual number of entries.
        actual: usize,
    },

    /// A travel time violated the solver contract (`>= 0`).
    #[error("negative travel time {value} at vertex {vertex}")]
    NegativeTravelTime {
        /// The offending vertex index.
        vertex: usize,
        /// The offending value.
        value: f64,
    },

    /// A triangle label fell outside the valid group range.
    #[error("triangle {triangle} has group {group}, outside [-1, {group_count})")]
    GroupOutOfRange {
        /// The offending triangle index.
        triangle: usize,
        /// The out-of-range group label.
        group: GroupId,
        /// Number of seed groups.
        group_count: usize,
    },

    /// A distribution parameter set cannot be sampled.
    #[error("invalid distribution: {reason}")]
    InvalidDistribution {
        /// Why the parameters were rejected.
        reason: String,
    },
}
