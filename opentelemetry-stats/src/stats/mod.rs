//! # Stats API
//!
//! Recording of measurements and their aggregation into views.
//!
//! A [`Measure`] names a quantity being recorded. A [`View`] binds a measure
//! to an [`Aggregation`] and a list of tag keys, its *columns*. Every
//! recording made through a [`MeasureMap`] is added to each view registered
//! for its measure, under the [`TagValues`] the recording's tags have for
//! the view's columns. Snapshots of the aggregated data are returned as
//! [`ViewData`] by the [`ViewManager`].
//!
//! Collection can be turned off with [`StatsProvider::set_state`]. While
//! disabled, recordings are dropped and views report no data.

mod aggregation;
mod aggregation_data;
mod bucket_boundaries;
mod exporter;
#[cfg(any(feature = "testing", test))]
mod in_memory_exporter;
pub(crate) mod internal;
mod measure;
mod mutable_aggregation;
mod provider;
mod recorder;
mod state;
mod tag_values;
mod view;
mod view_data;
mod view_manager;

pub use aggregation::Aggregation;
pub use aggregation_data::{AggregationData, DistributionData};
pub use bucket_boundaries::BucketBoundaries;
pub use exporter::StatsExporter;
#[cfg(any(feature = "testing", test))]
#[cfg_attr(docsrs, doc(cfg(feature = "testing")))]
pub use in_memory_exporter::InMemoryStatsExporter;
pub use measure::{Measure, MeasureDouble, MeasureKind, MeasureLong};
pub use mutable_aggregation::{
    MutableAggregation, MutableCount, MutableDistribution, MutableLastValue, MutableMean,
    MutableSum,
};
pub use provider::{StatsProvider, StatsProviderBuilder, OTEL_SDK_DISABLED};
pub use recorder::{MeasureMap, StatsRecorder};
pub use state::{CurrentStatsState, StatsCollectionState};
pub use tag_values::TagValues;
pub use view::{View, ViewName};
pub use view_data::ViewData;
pub use view_manager::ViewManager;
