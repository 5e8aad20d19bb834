use std::collections::HashMap;
use std::time::SystemTime;

use crate::error::{StatsError, StatsResult};

use super::{Aggregation, AggregationData, MeasureKind, TagValues, View};

/// A point-in-time snapshot of the data aggregated by a [`View`].
///
/// The snapshot is a copy: later recordings do not change it, and taking it
/// does not reset the view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewData {
    view: View,
    aggregation_map: HashMap<TagValues, AggregationData>,
    start: SystemTime,
    end: SystemTime,
}

impl ViewData {
    /// Creates a snapshot, checking every entry against the view's
    /// aggregation and measure kind.
    ///
    /// A mismatch means the data was not produced for this view and yields
    /// [`StatsError::AggregationMismatch`].
    pub fn new(
        view: View,
        aggregation_map: HashMap<TagValues, AggregationData>,
        start: SystemTime,
        end: SystemTime,
    ) -> StatsResult<Self> {
        for data in aggregation_map.values() {
            check_aggregation(view.aggregation(), view.measure().kind(), data)?;
        }
        Ok(ViewData {
            view,
            aggregation_map,
            start,
            end,
        })
    }

    /// The view the data was aggregated for.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// The aggregated data of every observed combination of tag values.
    pub fn aggregation_map(&self) -> &HashMap<TagValues, AggregationData> {
        &self.aggregation_map
    }

    /// Start of the aggregation window.
    pub fn start(&self) -> SystemTime {
        self.start
    }

    /// When the snapshot was taken.
    pub fn end(&self) -> SystemTime {
        self.end
    }
}

fn check_aggregation(
    aggregation: &Aggregation,
    kind: MeasureKind,
    data: &AggregationData,
) -> StatsResult<()> {
    let matches = match (aggregation, data) {
        (Aggregation::Sum, AggregationData::SumDouble(_)) => kind == MeasureKind::Double,
        (Aggregation::Sum, AggregationData::SumLong(_)) => kind == MeasureKind::Long,
        (Aggregation::Count, AggregationData::Count(_)) => true,
        (Aggregation::Mean, AggregationData::Mean { .. }) => true,
        (Aggregation::Distribution(boundaries), AggregationData::Distribution(d)) => {
            d.bucket_counts.len() == boundaries.bucket_count()
        }
        (Aggregation::LastValue, AggregationData::LastValueDouble(_)) => {
            kind == MeasureKind::Double
        }
        (Aggregation::LastValue, AggregationData::LastValueLong(_)) => kind == MeasureKind::Long,
        _ => false,
    };

    if matches {
        Ok(())
    } else {
        Err(StatsError::AggregationMismatch {
            expected: format!("{} over {}", aggregation, kind),
            found: data.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{BucketBoundaries, DistributionData, MeasureDouble, MeasureLong, ViewName};
    use crate::tags::TagKey;

    fn view(measure: impl Into<crate::stats::Measure>, aggregation: Aggregation) -> View {
        View::new(
            ViewName::new("view").unwrap(),
            "",
            measure,
            aggregation,
            vec![TagKey::new("k")],
        )
        .unwrap()
    }

    fn single(data: AggregationData) -> HashMap<TagValues, AggregationData> {
        let mut map = HashMap::new();
        map.insert(vec![Some("v")].into_iter().collect(), data);
        map
    }

    #[test]
    fn matching_data_is_accepted() {
        let double = MeasureDouble::new("d", "", "1").unwrap();
        let long = MeasureLong::new("l", "", "1").unwrap();
        let now = SystemTime::now();

        let cases = vec![
            (view(double.clone(), Aggregation::Sum), AggregationData::SumDouble(1.0)),
            (view(long.clone(), Aggregation::Sum), AggregationData::SumLong(1)),
            (view(long.clone(), Aggregation::Count), AggregationData::Count(1)),
            (
                view(double.clone(), Aggregation::Mean),
                AggregationData::Mean {
                    mean: 1.0,
                    count: 1,
                },
            ),
            (
                view(
                    double.clone(),
                    Aggregation::Distribution(BucketBoundaries::new(vec![0.0]).unwrap()),
                ),
                AggregationData::Distribution(DistributionData {
                    mean: 1.0,
                    count: 1,
                    min: 1.0,
                    max: 1.0,
                    sum_of_squared_deviations: 0.0,
                    bucket_counts: vec![0, 1],
                }),
            ),
            (view(long, Aggregation::LastValue), AggregationData::LastValueLong(3)),
        ];

        for (view, data) in cases {
            assert!(ViewData::new(view, single(data), now, now).is_ok());
        }
    }

    #[test]
    fn mismatched_data_is_rejected() {
        let double = MeasureDouble::new("d", "", "1").unwrap();
        let now = SystemTime::now();

        let err = ViewData::new(
            view(double.clone(), Aggregation::Sum),
            single(AggregationData::Count(1)),
            now,
            now,
        )
        .unwrap_err();
        assert!(matches!(err, StatsError::AggregationMismatch { .. }));

        // long flavour of the right aggregation on a double measure
        assert!(ViewData::new(
            view(double.clone(), Aggregation::LastValue),
            single(AggregationData::LastValueLong(1)),
            now,
            now,
        )
        .is_err());

        // wrong number of buckets
        assert!(ViewData::new(
            view(
                double,
                Aggregation::Distribution(BucketBoundaries::new(vec![0.0, 1.0]).unwrap())
            ),
            single(AggregationData::Distribution(DistributionData {
                mean: 0.0,
                count: 0,
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
                sum_of_squared_deviations: 0.0,
                bucket_counts: vec![0, 0],
            })),
            now,
            now,
        )
        .is_err());
    }
}
