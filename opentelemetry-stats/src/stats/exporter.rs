//! Interface for consumers of [`ViewData`] snapshots.

use crate::error::StatsResult;
use crate::stats::ViewData;

/// Receives view snapshots gathered by [`ViewManager::export_to`].
///
/// This crate never pushes data on its own; the exporter is driven by
/// whoever calls [`ViewManager::export_to`].
///
/// [`ViewManager::export_to`]: crate::stats::ViewManager::export_to
pub trait StatsExporter: Send + Sync {
    /// Exports one batch of snapshots, one per registered view.
    fn export(&self, batch: &[ViewData]) -> StatsResult<()>;
}
