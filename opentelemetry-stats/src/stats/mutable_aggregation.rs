//! Stateful accumulators backing each tag-value combination of a view.
//!
//! Every accumulator takes `f64` values regardless of the kind of measure
//! they were recorded on; the measure kind is only applied when a snapshot is
//! taken.

use crate::error::{StatsError, StatsResult};

use super::{Aggregation, AggregationData, BucketBoundaries, DistributionData, MeasureKind};

/// Running sum of recorded values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutableSum {
    sum: f64,
}

impl MutableSum {
    /// Creates an empty sum.
    pub fn new() -> Self {
        MutableSum::default()
    }

    /// The current sum.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    fn add(&mut self, value: f64) {
        self.sum += value;
    }

    fn combine(&mut self, other: &MutableSum, fraction: f64) {
        self.sum += other.sum * fraction;
    }
}

/// Running count of recorded values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutableCount {
    count: i64,
}

impl MutableCount {
    /// Creates an empty count.
    pub fn new() -> Self {
        MutableCount::default()
    }

    /// The current count.
    pub fn count(&self) -> i64 {
        self.count
    }

    fn add(&mut self, _value: f64) {
        self.count += 1;
    }

    fn combine(&mut self, other: &MutableCount, fraction: f64) {
        self.count += (other.count as f64 * fraction).round() as i64;
    }
}

/// Running mean of recorded values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutableMean {
    mean: f64,
    count: i64,
}

impl MutableMean {
    /// Creates an empty mean.
    pub fn new() -> Self {
        MutableMean::default()
    }

    /// The current mean, `0` when nothing was recorded.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// The number of values the mean is computed over.
    pub fn count(&self) -> i64 {
        self.count
    }

    fn add(&mut self, value: f64) {
        self.count += 1;
        self.mean += (value - self.mean) / self.count as f64;
    }

    fn combine(&mut self, other: &MutableMean, fraction: f64) {
        let sum = self.mean * self.count as f64 + other.mean * other.count as f64 * fraction;
        self.count += (other.count as f64 * fraction).round() as i64;
        self.mean = if self.count == 0 {
            0.0
        } else {
            sum / self.count as f64
        };
    }
}

/// Running distribution of recorded values.
///
/// Mean and sum of squared deviations are maintained with Welford's online
/// algorithm.
#[derive(Clone, Debug, PartialEq)]
pub struct MutableDistribution {
    boundaries: BucketBoundaries,
    mean: f64,
    count: i64,
    min: f64,
    max: f64,
    sum_of_squared_deviations: f64,
    bucket_counts: Vec<i64>,
}

impl MutableDistribution {
    /// Creates an empty distribution over the given buckets.
    pub fn new(boundaries: BucketBoundaries) -> Self {
        MutableDistribution {
            bucket_counts: vec![0; boundaries.bucket_count()],
            boundaries,
            mean: 0.0,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum_of_squared_deviations: 0.0,
        }
    }

    /// The mean of recorded values.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// The number of recorded values.
    pub fn count(&self) -> i64 {
        self.count
    }

    /// The smallest recorded value, `+∞` when nothing was recorded.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The largest recorded value, `-∞` when nothing was recorded.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// The sum of squared deviations from the mean.
    pub fn sum_of_squared_deviations(&self) -> f64 {
        self.sum_of_squared_deviations
    }

    /// Per-bucket counts.
    pub fn bucket_counts(&self) -> &[i64] {
        &self.bucket_counts
    }

    fn add(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.sum_of_squared_deviations += delta * (value - self.mean);

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }

        let index = self.boundaries.bucket_index(value);
        self.bucket_counts[index] += 1;
    }

    fn combine(&mut self, other: &MutableDistribution) -> StatsResult<()> {
        if self.boundaries != other.boundaries {
            return Err(StatsError::AggregationMismatch {
                expected: format!("Distribution{:?}", self.boundaries.boundaries()),
                found: format!("Distribution{:?}", other.boundaries.boundaries()),
            });
        }
        if other.count == 0 {
            return Ok(());
        }

        let total = self.count + other.count;
        let delta = other.mean - self.mean;
        self.sum_of_squared_deviations += other.sum_of_squared_deviations
            + delta * delta * (self.count as f64 * other.count as f64) / total as f64;
        self.mean = (self.mean * self.count as f64 + other.mean * other.count as f64)
            / total as f64;
        self.count = total;

        if other.min < self.min {
            self.min = other.min;
        }
        if other.max > self.max {
            self.max = other.max;
        }
        for (count, other_count) in self.bucket_counts.iter_mut().zip(&other.bucket_counts) {
            *count += other_count;
        }
        Ok(())
    }
}

/// The last recorded value.
#[derive(Clone, Debug, PartialEq)]
pub struct MutableLastValue {
    last_value: f64,
}

impl Default for MutableLastValue {
    fn default() -> Self {
        MutableLastValue {
            last_value: f64::NAN,
        }
    }
}

impl MutableLastValue {
    /// Creates a last value holding NaN.
    pub fn new() -> Self {
        MutableLastValue::default()
    }

    /// The last recorded value, NaN when nothing was recorded.
    pub fn last_value(&self) -> f64 {
        self.last_value
    }

    fn add(&mut self, value: f64) {
        self.last_value = value;
    }

    fn combine(&mut self, other: &MutableLastValue) {
        self.last_value = other.last_value;
    }
}

/// A mutable accumulator of one of the five [`Aggregation`] kinds.
///
/// # Examples
///
/// ```
/// use opentelemetry_stats::stats::{Aggregation, MutableAggregation};
///
/// let mut sum = MutableAggregation::new(&Aggregation::Sum);
/// sum.add(10.0);
/// sum.add(20.0);
///
/// match sum {
///     MutableAggregation::Sum(s) => assert_eq!(s.sum(), 30.0),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum MutableAggregation {
    /// See [`MutableSum`].
    Sum(MutableSum),
    /// See [`MutableCount`].
    Count(MutableCount),
    /// See [`MutableMean`].
    Mean(MutableMean),
    /// See [`MutableDistribution`].
    Distribution(MutableDistribution),
    /// See [`MutableLastValue`].
    LastValue(MutableLastValue),
}

impl MutableAggregation {
    /// Creates an empty accumulator for the given aggregation.
    pub fn new(aggregation: &Aggregation) -> Self {
        match aggregation {
            Aggregation::Sum => MutableAggregation::Sum(MutableSum::new()),
            Aggregation::Count => MutableAggregation::Count(MutableCount::new()),
            Aggregation::Mean => MutableAggregation::Mean(MutableMean::new()),
            Aggregation::Distribution(boundaries) => {
                MutableAggregation::Distribution(MutableDistribution::new(boundaries.clone()))
            }
            Aggregation::LastValue => MutableAggregation::LastValue(MutableLastValue::new()),
        }
    }

    /// Incorporates a recorded value.
    ///
    /// NaN and infinities are not filtered and propagate per IEEE arithmetic.
    pub fn add(&mut self, value: f64) {
        match self {
            MutableAggregation::Sum(a) => a.add(value),
            MutableAggregation::Count(a) => a.add(value),
            MutableAggregation::Mean(a) => a.add(value),
            MutableAggregation::Distribution(a) => a.add(value),
            MutableAggregation::LastValue(a) => a.add(value),
        }
    }

    /// Merges `other` into this accumulator.
    ///
    /// For sums, counts and means the contribution of `other` is scaled by
    /// `fraction`; counts are rounded to the nearest integer. Distributions
    /// and last values ignore `fraction` and merge `other` as a whole.
    ///
    /// Returns [`StatsError::AggregationMismatch`] if `other` is a different
    /// kind of accumulator, or a distribution over different buckets.
    pub fn combine(&mut self, other: &MutableAggregation, fraction: f64) -> StatsResult<()> {
        match (self, other) {
            (MutableAggregation::Sum(a), MutableAggregation::Sum(b)) => a.combine(b, fraction),
            (MutableAggregation::Count(a), MutableAggregation::Count(b)) => a.combine(b, fraction),
            (MutableAggregation::Mean(a), MutableAggregation::Mean(b)) => a.combine(b, fraction),
            (MutableAggregation::Distribution(a), MutableAggregation::Distribution(b)) => {
                a.combine(b)?
            }
            (MutableAggregation::LastValue(a), MutableAggregation::LastValue(b)) => a.combine(b),
            (this, other) => {
                return Err(StatsError::AggregationMismatch {
                    expected: this.kind_name().into(),
                    found: other.kind_name().into(),
                })
            }
        }
        Ok(())
    }

    /// Takes an immutable snapshot, rounding to integers for long measures.
    pub fn to_aggregation_data(&self, measure_kind: MeasureKind) -> AggregationData {
        match (self, measure_kind) {
            (MutableAggregation::Sum(a), MeasureKind::Double) => AggregationData::SumDouble(a.sum),
            (MutableAggregation::Sum(a), MeasureKind::Long) => {
                AggregationData::SumLong(a.sum.round() as i64)
            }
            (MutableAggregation::Count(a), _) => AggregationData::Count(a.count),
            (MutableAggregation::Mean(a), _) => AggregationData::Mean {
                mean: a.mean,
                count: a.count,
            },
            (MutableAggregation::Distribution(a), _) => {
                AggregationData::Distribution(DistributionData {
                    mean: a.mean,
                    count: a.count,
                    min: a.min,
                    max: a.max,
                    sum_of_squared_deviations: a.sum_of_squared_deviations,
                    bucket_counts: a.bucket_counts.clone(),
                })
            }
            (MutableAggregation::LastValue(a), MeasureKind::Double) => {
                AggregationData::LastValueDouble(a.last_value)
            }
            (MutableAggregation::LastValue(a), MeasureKind::Long) => {
                AggregationData::LastValueLong(a.last_value.round() as i64)
            }
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            MutableAggregation::Sum(_) => "Sum",
            MutableAggregation::Count(_) => "Count",
            MutableAggregation::Mean(_) => "Mean",
            MutableAggregation::Distribution(_) => "Distribution",
            MutableAggregation::LastValue(_) => "LastValue",
        }
    }
}
