use std::result;
use std::sync::PoisonError;
use thiserror::Error;

/// A specialized `Result` type for stats operations.
pub type StatsResult<T> = result::Result<T, StatsError>;

/// Errors returned by the stats API.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum StatsError {
    /// A measure, view or tag key name failed validation.
    #[error("Invalid name {name:?}: {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Which rule the name broke.
        reason: &'static str,
    },
    /// A measure unit failed validation.
    #[error("Invalid unit {unit:?}: {reason}")]
    InvalidUnit {
        /// The rejected unit.
        unit: String,
        /// Which rule the unit broke.
        reason: &'static str,
    },
    /// The same tag key appears more than once in a view's columns.
    #[error("Duplicate column in view: {0}")]
    DuplicateColumn(String),
    /// Histogram bucket boundaries are not strictly increasing or contain NaN.
    #[error("Invalid bucket boundaries: {0}")]
    InvalidBucketBoundaries(String),
    /// A different view with the same name is already registered.
    #[error("A different view with the same name is already registered: {0}")]
    ViewConflict(String),
    /// A different measure with the same name is already registered.
    #[error("A different measure with the same name is already registered: {0}")]
    MeasureConflict(String),
    /// The collection state was already read and can no longer change.
    #[error("State was already read, cannot set state")]
    StateLocked,
    /// Aggregated data does not match the aggregation its view asks for.
    #[error("Aggregation mismatch: expected {expected}, found {found}")]
    AggregationMismatch {
        /// Name of the aggregation the view was registered with.
        expected: String,
        /// Name of the aggregation actually encountered.
        found: String,
    },
    /// Other errors not covered by specific cases.
    #[error("Stats error: {0}")]
    Other(String),
}

impl<T> From<PoisonError<T>> for StatsError {
    fn from(err: PoisonError<T>) -> Self {
        StatsError::Other(err.to_string())
    }
}
