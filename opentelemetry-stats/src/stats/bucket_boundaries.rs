use std::sync::Arc;

use crate::error::{StatsError, StatsResult};

/// The increasing bucket edges of a distribution.
///
/// Boundaries define bucket upper bounds. Buckets are exclusive of their
/// lower boundary and inclusive of their upper bound, so a value equal to a
/// boundary lands in the lower bucket. As an example, boundaries defined as
/// `[-10.0, 0.0, 10.0]` define these buckets:
///
/// (-∞, -10.0], (-10.0, 0.0], (0.0, 10.0], (10.0, +∞)
///
/// Empty boundaries define a single bucket covering every value.
#[derive(Clone, Debug, PartialEq)]
pub struct BucketBoundaries(Arc<[f64]>);

impl BucketBoundaries {
    /// Creates bucket boundaries, rejecting NaN and non-increasing edges.
    pub fn new(boundaries: impl Into<Vec<f64>>) -> StatsResult<Self> {
        let boundaries = boundaries.into();
        if boundaries.iter().any(|b| b.is_nan()) {
            return Err(StatsError::InvalidBucketBoundaries(format!(
                "NaN boundary: {:?}",
                boundaries
            )));
        }
        for x in boundaries.windows(2) {
            if x[0] >= x[1] {
                return Err(StatsError::InvalidBucketBoundaries(format!(
                    "non-monotonic boundaries: {:?}",
                    boundaries
                )));
            }
        }
        Ok(BucketBoundaries(boundaries.into()))
    }

    /// The boundary values.
    pub fn boundaries(&self) -> &[f64] {
        &self.0
    }

    /// Number of buckets these boundaries define.
    pub fn bucket_count(&self) -> usize {
        self.0.len() + 1
    }

    /// Index of the bucket `value` falls into.
    ///
    /// The result is in `[0, boundaries.len()]`; it equals `boundaries.len()`
    /// when the value is greater than the last boundary.
    pub(crate) fn bucket_index(&self, value: f64) -> usize {
        self.0.partition_point(|&b| b < value)
    }
}
