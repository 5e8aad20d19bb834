//! # OpenTelemetry Stats
//!
//! In-process stats recording and aggregation. Measurements are recorded
//! against [`Measure`]s together with a [`TagContext`], routed to every
//! registered [`View`] of that measure and aggregated per combination of the
//! view's tag values. Snapshots of the aggregated data are served as
//! [`ViewData`] by the [`ViewManager`].
//!
//! ## Getting started
//!
//! ```
//! use opentelemetry_stats::stats::{
//!     Aggregation, MeasureDouble, StatsProvider, View, ViewName,
//! };
//! use opentelemetry_stats::tags::{TagContext, TagKey};
//!
//! # fn main() -> Result<(), opentelemetry_stats::StatsError> {
//! let provider = StatsProvider::default();
//!
//! let latency = MeasureDouble::new("http/server/latency", "Server latency", "ms")?;
//! let method = TagKey::new("method");
//! let view = View::new(
//!     ViewName::new("http/server/latency/sum")?,
//!     "Total server latency by method",
//!     latency.clone(),
//!     Aggregation::Sum,
//!     vec![method.clone()],
//! )?;
//! provider.view_manager().register_view(&view)?;
//!
//! let tags = TagContext::builder().with_tag(method, "GET").build();
//! provider
//!     .stats_recorder()
//!     .new_measure_map()
//!     .put_f64(&latency, 12.5)
//!     .record(&tags);
//!
//! let data = provider.view_manager().get_view("http/server/latency/sum")?;
//! assert!(data.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Collection state
//!
//! Stats collection is [`StatsCollectionState::Enabled`] by default. Disabling
//! it discards all aggregated data and turns recording into a no-op. The
//! state can only be changed until it has been read through
//! [`StatsProvider::state`].
//!
//! ## Crate Feature Flags
//!
//! * `internal-logs`: Enables internal logging via `tracing` (default).
//! * `testing`: Exposes the in-memory exporter for use in downstream tests.
//!
//! [`Measure`]: stats::Measure
//! [`TagContext`]: tags::TagContext
//! [`View`]: stats::View
//! [`ViewData`]: stats::ViewData
//! [`ViewManager`]: stats::ViewManager
//! [`StatsCollectionState::Enabled`]: stats::StatsCollectionState::Enabled
//! [`StatsProvider::state`]: stats::StatsProvider::state
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]

mod error;
pub mod global;
pub mod stats;
pub mod tags;
pub(crate) mod validation;

pub use error::{StatsError, StatsResult};

#[cfg(feature = "internal-logs")]
#[doc(hidden)]
pub mod _private {
    pub use tracing::{debug, error, info, warn};
}
