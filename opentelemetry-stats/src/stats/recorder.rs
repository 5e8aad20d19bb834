use std::sync::Arc;

use crate::otel_debug;
use crate::stats::provider::StatsProviderInner;
use crate::stats::{Measure, MeasureDouble, MeasureLong, StatsCollectionState};
use crate::tags::TagContext;

/// Entry point for recording measurements.
///
/// Obtained from [`StatsProvider::stats_recorder`]. Clones share the same
/// views and collection state.
///
/// [`StatsProvider::stats_recorder`]: crate::stats::StatsProvider::stats_recorder
#[derive(Clone, Debug)]
pub struct StatsRecorder {
    inner: Arc<StatsProviderInner>,
}

impl StatsRecorder {
    pub(crate) fn new(inner: Arc<StatsProviderInner>) -> Self {
        StatsRecorder { inner }
    }

    /// Returns an empty [`MeasureMap`] bound to this recorder.
    pub fn new_measure_map(&self) -> MeasureMap {
        MeasureMap {
            inner: Arc::clone(&self.inner),
            measurements: Vec::new(),
        }
    }
}

/// A set of measurements to record together against one tag context.
///
/// Putting a value for a measure that already has one replaces it. A map
/// can be recorded any number of times, each time against the tags given to
/// that call.
#[derive(Clone, Debug)]
pub struct MeasureMap {
    inner: Arc<StatsProviderInner>,
    measurements: Vec<(Measure, f64)>,
}

impl MeasureMap {
    /// Stages a value for a double measure.
    pub fn put_f64(self, measure: &MeasureDouble, value: f64) -> Self {
        self.put(Measure::Double(measure.clone()), value)
    }

    /// Stages a value for a long measure.
    pub fn put_i64(self, measure: &MeasureLong, value: i64) -> Self {
        self.put(Measure::Long(measure.clone()), value as f64)
    }

    fn put(mut self, measure: Measure, value: f64) -> Self {
        match self.measurements.iter_mut().find(|(m, _)| *m == measure) {
            Some((_, staged)) => *staged = value,
            None => self.measurements.push((measure, value)),
        }
        self
    }

    /// Records the staged values against `tags`.
    ///
    /// Does nothing while collection is disabled.
    pub fn record(&self, tags: &TagContext) {
        if self.inner.state.get_internal() == StatsCollectionState::Disabled {
            otel_debug!(
                name: "StatsRecorder.RecordingDropped",
                measurements = self.measurements.len(),
                message = "Stats collection is disabled."
            );
            return;
        }

        for (measure, value) in &self.measurements {
            self.inner.views.record(tags, measure, *value);
        }
    }

    /// Records the staged values against the current thread's tag context.
    pub fn record_current(&self) {
        TagContext::map_current(|tags| self.record(tags))
    }

    /// Number of staged measurements.
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Returns `true` if nothing has been staged.
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}
