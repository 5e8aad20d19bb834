//! Immutable snapshots of aggregated values.

use std::fmt;

/// Summary of a distribution of values.
#[derive(Clone, Debug, PartialEq)]
pub struct DistributionData {
    /// Arithmetic mean of the recorded values.
    pub mean: f64,
    /// Number of recorded values.
    pub count: i64,
    /// Smallest recorded value.
    pub min: f64,
    /// Largest recorded value.
    pub max: f64,
    /// Sum of squared deviations from the mean.
    pub sum_of_squared_deviations: f64,
    /// Number of values in each bucket, one more than there are boundaries.
    pub bucket_counts: Vec<i64>,
}

/// The aggregated value of one tag-value combination of a view.
#[derive(Clone, Debug, PartialEq)]
pub enum AggregationData {
    /// Sum of a [`MeasureDouble`](super::MeasureDouble).
    SumDouble(f64),
    /// Sum of a [`MeasureLong`](super::MeasureLong), rounded.
    SumLong(i64),
    /// Number of recorded values.
    Count(i64),
    /// Mean and count of the recorded values.
    Mean {
        /// Arithmetic mean.
        mean: f64,
        /// Number of recorded values.
        count: i64,
    },
    /// Distribution of the recorded values.
    Distribution(DistributionData),
    /// Last recorded value of a [`MeasureDouble`](super::MeasureDouble).
    LastValueDouble(f64),
    /// Last recorded value of a [`MeasureLong`](super::MeasureLong), rounded.
    LastValueLong(i64),
}

impl fmt::Display for AggregationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregationData::SumDouble(_) => "SumDouble",
            AggregationData::SumLong(_) => "SumLong",
            AggregationData::Count(_) => "Count",
            AggregationData::Mean { .. } => "Mean",
            AggregationData::Distribution(_) => "Distribution",
            AggregationData::LastValueDouble(_) => "LastValueDouble",
            AggregationData::LastValueLong(_) => "LastValueLong",
        };

        f.write_str(name)
    }
}
