use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::{StatsError, StatsResult};
use crate::stats::exporter::StatsExporter;
use crate::stats::ViewData;

/// A [`StatsExporter`] that keeps exported batches in memory.
///
/// Useful for testing and debugging. Clones share the same storage.
///
/// Only available with the `testing` feature.
#[derive(Clone, Default)]
pub struct InMemoryStatsExporter {
    batches: Arc<Mutex<VecDeque<Vec<ViewData>>>>,
}

impl fmt::Debug for InMemoryStatsExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryStatsExporter").finish()
    }
}

impl InMemoryStatsExporter {
    /// Returns the exported batches, oldest first.
    pub fn get_finished_batches(&self) -> StatsResult<Vec<Vec<ViewData>>> {
        self.batches
            .lock()
            .map(|batches| batches.iter().cloned().collect())
            .map_err(StatsError::from)
    }

    /// Discards all exported batches.
    pub fn reset(&self) {
        let _ = self.batches.lock().map(|mut batches| batches.clear());
    }
}

impl StatsExporter for InMemoryStatsExporter {
    fn export(&self, batch: &[ViewData]) -> StatsResult<()> {
        self.batches
            .lock()
            .map(|mut batches| batches.push_back(batch.to_vec()))
            .map_err(StatsError::from)
    }
}
