use std::fmt;

use super::BucketBoundaries;

/// The way recorded measurements are summarized by a view.
#[derive(Clone, Debug, PartialEq)]
pub enum Aggregation {
    /// Summarizes measurements as their arithmetic sum.
    Sum,

    /// Counts the number of measurements, ignoring their values.
    Count,

    /// Summarizes measurements as their arithmetic mean and count.
    Mean,

    /// Summarizes measurements as a histogram with explicitly defined buckets,
    /// along with their count, mean, min, max and sum of squared deviations.
    Distribution(BucketBoundaries),

    /// Summarizes measurements as the last one made.
    LastValue,
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Aggregation::Sum => "Sum",
            Aggregation::Count => "Count",
            Aggregation::Mean => "Mean",
            Aggregation::Distribution(_) => "Distribution",
            Aggregation::LastValue => "LastValue",
        };

        f.write_str(name)
    }
}
