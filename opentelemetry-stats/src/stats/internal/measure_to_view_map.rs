use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{StatsError, StatsResult};
use crate::stats::{
    Measure, MutableAggregation, StatsCollectionState, TagValues, View, ViewData, ViewName,
};
use crate::tags::TagContext;
use crate::{otel_debug, otel_info, otel_warn};

/// The live aggregations of one registered view.
///
/// Each tag-value combination owns its own lock so that recordings into
/// different combinations do not contend once the entry exists.
struct MutableViewData {
    view: View,
    aggregations: RwLock<HashMap<TagValues, Arc<Mutex<MutableAggregation>>>>,
    start: Mutex<SystemTime>,
}

impl MutableViewData {
    fn new(view: View) -> Self {
        MutableViewData {
            view,
            aggregations: RwLock::new(HashMap::new()),
            start: Mutex::new(SystemTime::now()),
        }
    }

    fn record(&self, tags: &TagContext, value: f64) {
        let tag_values = TagValues::from_tags(tags, self.view.columns());

        let aggregations = self
            .aggregations
            .read()
            .unwrap_or_else(|err| err.into_inner());
        if let Some(aggregation) = aggregations.get(&tag_values) {
            aggregation
                .lock()
                .unwrap_or_else(|err| err.into_inner())
                .add(value);
            return;
        }
        drop(aggregations);

        let mut aggregations = self
            .aggregations
            .write()
            .unwrap_or_else(|err| err.into_inner());

        // Recheck again in case another thread already inserted
        let aggregation = aggregations.entry(tag_values).or_insert_with(|| {
            Arc::new(Mutex::new(MutableAggregation::new(self.view.aggregation())))
        });
        aggregation
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .add(value);
    }

    fn snapshot(&self, state: StatsCollectionState) -> StatsResult<ViewData> {
        if state == StatsCollectionState::Disabled {
            return ViewData::new(self.view.clone(), HashMap::new(), UNIX_EPOCH, UNIX_EPOCH);
        }

        let kind = self.view.measure().kind();
        let aggregations = self.aggregations.read()?;
        let mut data = HashMap::with_capacity(aggregations.len());
        for (tag_values, aggregation) in aggregations.iter() {
            let aggregation = aggregation.lock()?;
            data.insert(tag_values.clone(), aggregation.to_aggregation_data(kind));
        }
        drop(aggregations);

        let start = *self.start.lock()?;
        ViewData::new(self.view.clone(), data, start, SystemTime::now())
    }

    fn clear(&self) {
        self.aggregations
            .write()
            .unwrap_or_else(|err| err.into_inner())
            .clear();
    }

    fn resume(&self, now: SystemTime) {
        *self.start.lock().unwrap_or_else(|err| err.into_inner()) = now;
    }
}

#[derive(Default)]
struct Registry {
    views: HashMap<ViewName, Arc<MutableViewData>>,
    /// Registered views in registration order.
    ordered: Vec<View>,
    measures: HashMap<String, Measure>,
    views_by_measure: HashMap<String, Vec<Arc<MutableViewData>>>,
}

/// Routes recorded measurements to the views registered for their measure.
#[derive(Default)]
pub(crate) struct MeasureToViewMap {
    registry: RwLock<Registry>,
    exported_views: Mutex<Option<Arc<[View]>>>,
}

impl std::fmt::Debug for MeasureToViewMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let views = self
            .registry
            .read()
            .map(|registry| registry.ordered.len())
            .unwrap_or_default();
        f.debug_struct("MeasureToViewMap")
            .field("views", &views)
            .finish()
    }
}

impl MeasureToViewMap {
    /// Registers `view`.
    ///
    /// Registering a view equal to an already registered one is a no-op.
    pub(crate) fn register_view(&self, view: &View) -> StatsResult<()> {
        let mut registry = self.registry.write()?;

        if let Some(existing) = registry.views.get(view.name()) {
            if existing.view == *view {
                return Ok(());
            }
            otel_warn!(
                name: "ViewManager.ViewConflict",
                view_name = view.name().as_str(),
                message = "A different view with the same name is already registered."
            );
            return Err(StatsError::ViewConflict(view.name().to_string()));
        }

        let measure = view.measure();
        if let Some(registered) = registry.measures.get(measure.name()) {
            if registered != measure {
                otel_warn!(
                    name: "ViewManager.MeasureConflict",
                    view_name = view.name().as_str(),
                    measure_name = measure.name(),
                    message = "A different measure with the same name is already registered."
                );
                return Err(StatsError::MeasureConflict(measure.name().to_string()));
            }
        }

        let view_data = Arc::new(MutableViewData::new(view.clone()));
        registry
            .measures
            .entry(measure.name().to_string())
            .or_insert_with(|| measure.clone());
        registry
            .views_by_measure
            .entry(measure.name().to_string())
            .or_default()
            .push(Arc::clone(&view_data));
        registry.views.insert(view.name().clone(), view_data);
        registry.ordered.push(view.clone());
        drop(registry);

        *self
            .exported_views
            .lock()
            .unwrap_or_else(|err| err.into_inner()) = None;

        otel_info!(
            name: "ViewManager.ViewRegistered",
            view_name = view.name().as_str(),
            measure_name = measure.name(),
            aggregation = view.aggregation().to_string()
        );
        Ok(())
    }

    /// Adds `value` to every view registered for `measure`.
    pub(crate) fn record(&self, tags: &TagContext, measure: &Measure, value: f64) {
        let registry = self.registry.read().unwrap_or_else(|err| err.into_inner());

        let Some(views) = registry.views_by_measure.get(measure.name()) else {
            return;
        };
        if registry.measures.get(measure.name()) != Some(measure) {
            otel_debug!(
                name: "StatsRecorder.MeasureMismatch",
                measure_name = measure.name(),
                message = "Recording skipped, measure differs from the registered one."
            );
            return;
        }

        for view in views {
            view.record(tags, value);
        }
    }

    /// Returns a snapshot of the named view, or `None` if it is not
    /// registered.
    pub(crate) fn get_view(
        &self,
        name: &str,
        state: StatsCollectionState,
    ) -> StatsResult<Option<ViewData>> {
        let view = {
            let registry = self.registry.read()?;
            match registry.views.get(name) {
                Some(view) => Arc::clone(view),
                None => return Ok(None),
            }
        };

        view.snapshot(state).map(Some)
    }

    /// All registered views, in registration order.
    pub(crate) fn exported_views(&self) -> Arc<[View]> {
        let mut cached = self
            .exported_views
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        if let Some(views) = cached.as_ref() {
            return Arc::clone(views);
        }

        let views: Arc<[View]> = self
            .registry
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .ordered
            .iter()
            .cloned()
            .collect();
        *cached = Some(Arc::clone(&views));
        views
    }

    /// Discards the aggregated data of every view. Views stay registered.
    pub(crate) fn clear_stats(&self) {
        let registry = self.registry.read().unwrap_or_else(|err| err.into_inner());
        for view in registry.views.values() {
            view.clear();
        }
    }

    /// Starts a new aggregation window for every view.
    pub(crate) fn resume_stats_collection(&self) {
        let now = SystemTime::now();
        let registry = self.registry.read().unwrap_or_else(|err| err.into_inner());
        for view in registry.views.values() {
            view.resume(now);
        }
    }
}
