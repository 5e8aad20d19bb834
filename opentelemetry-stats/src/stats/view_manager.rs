use std::sync::Arc;

use crate::error::StatsResult;
use crate::otel_debug;
use crate::stats::exporter::StatsExporter;
use crate::stats::provider::StatsProviderInner;
use crate::stats::{View, ViewData};

/// Registers views and serves snapshots of their data.
///
/// Obtained from [`StatsProvider::view_manager`]. Clones share the same
/// views and collection state.
///
/// [`StatsProvider::view_manager`]: crate::stats::StatsProvider::view_manager
#[derive(Clone, Debug)]
pub struct ViewManager {
    inner: Arc<StatsProviderInner>,
}

impl ViewManager {
    pub(crate) fn new(inner: Arc<StatsProviderInner>) -> Self {
        ViewManager { inner }
    }

    /// Registers a view so that recordings of its measure are aggregated.
    ///
    /// Registering the same view again is a no-op. Fails with
    /// [`StatsError::ViewConflict`] if a different view with the same name
    /// exists, or [`StatsError::MeasureConflict`] if a different measure
    /// with the same name backs an existing view. Existing registrations are
    /// left untouched on failure.
    ///
    /// [`StatsError::ViewConflict`]: crate::StatsError::ViewConflict
    /// [`StatsError::MeasureConflict`]: crate::StatsError::MeasureConflict
    pub fn register_view(&self, view: &View) -> StatsResult<()> {
        self.inner.views.register_view(view)
    }

    /// Returns a snapshot of the named view, or `None` if no such view is
    /// registered.
    ///
    /// While collection is disabled the snapshot holds no data and both of
    /// its timestamps are [`UNIX_EPOCH`](std::time::UNIX_EPOCH).
    pub fn get_view(&self, name: &str) -> StatsResult<Option<ViewData>> {
        self.inner
            .views
            .get_view(name, self.inner.state.get_internal())
    }

    /// All registered views, in registration order.
    pub fn all_exported_views(&self) -> Arc<[View]> {
        self.inner.views.exported_views()
    }

    /// Takes a snapshot of every registered view.
    pub fn collect(&self) -> StatsResult<Vec<ViewData>> {
        let views = self.all_exported_views();
        let mut batch = Vec::with_capacity(views.len());
        for view in views.iter() {
            if let Some(data) = self.get_view(view.name().as_str())? {
                batch.push(data);
            }
        }
        Ok(batch)
    }

    /// Collects every registered view and hands the snapshots to `exporter`.
    pub fn export_to(&self, exporter: &dyn StatsExporter) -> StatsResult<()> {
        let batch = self.collect()?;
        otel_debug!(
            name: "ViewManager.Export",
            views = batch.len(),
            message = "Exporting view snapshots."
        );
        exporter.export(&batch)
    }
}
