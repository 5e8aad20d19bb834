use std::env;
use std::sync::{Arc, Mutex};

use crate::error::StatsResult;
use crate::stats::internal::MeasureToViewMap;
use crate::stats::{CurrentStatsState, StatsCollectionState, StatsRecorder, ViewManager};
use crate::{otel_debug, otel_info, otel_warn};

/// Disables stats collection at startup when set to `true`.
pub const OTEL_SDK_DISABLED: &str = "OTEL_SDK_DISABLED";

#[derive(Debug)]
pub(crate) struct StatsProviderInner {
    pub(crate) state: CurrentStatsState,
    pub(crate) views: MeasureToViewMap,
    /// Held across a state change and the clear or resume that follows it.
    pub(crate) transition: Mutex<()>,
}

/// Owns one independent set of registered views and its collection state.
///
/// Recorders and view managers handed out by the same provider share its
/// views. Clones of a provider are cheap and refer to the same data.
///
/// # Examples
///
/// ```
/// use opentelemetry_stats::stats::{StatsCollectionState, StatsProvider};
///
/// let provider = StatsProvider::builder()
///     .with_state(StatsCollectionState::Disabled)
///     .build();
///
/// // Recording is now a no-op, until collection is enabled again.
/// assert_eq!(provider.set_state(StatsCollectionState::Enabled), Ok(true));
/// ```
#[derive(Clone, Debug)]
pub struct StatsProvider {
    inner: Arc<StatsProviderInner>,
}

impl Default for StatsProvider {
    fn default() -> Self {
        StatsProvider::builder().build()
    }
}

impl StatsProvider {
    /// Create a new [`StatsProvider`] builder.
    pub fn builder() -> StatsProviderBuilder {
        StatsProviderBuilder::default()
    }

    /// Returns a recorder for this provider's views.
    pub fn stats_recorder(&self) -> StatsRecorder {
        StatsRecorder::new(Arc::clone(&self.inner))
    }

    /// Returns a view manager for this provider's views.
    pub fn view_manager(&self) -> ViewManager {
        ViewManager::new(Arc::clone(&self.inner))
    }

    /// Returns the collection state.
    ///
    /// After this has been called the state can no longer be changed, and
    /// [`set_state`](StatsProvider::set_state) fails.
    pub fn state(&self) -> StatsCollectionState {
        self.inner.state.get()
    }

    /// Changes the collection state.
    ///
    /// Disabling discards all aggregated data; enabling starts a new
    /// aggregation window. Returns `Ok(false)` if the state already had the
    /// requested value and [`StatsError::StateLocked`] once
    /// [`state`](StatsProvider::state) has been read.
    ///
    /// [`StatsError::StateLocked`]: crate::StatsError::StateLocked
    pub fn set_state(&self, state: StatsCollectionState) -> StatsResult<bool> {
        let _transition = self.inner.transition.lock()?;
        let changed = match self.inner.state.set(state) {
            Ok(changed) => changed,
            Err(err) => {
                otel_warn!(
                    name: "StatsProvider.StateChangeRejected",
                    requested = state.to_string(),
                    message = "Collection state was already read and can no longer change."
                );
                return Err(err);
            }
        };

        if changed {
            match state {
                StatsCollectionState::Disabled => self.inner.views.clear_stats(),
                StatsCollectionState::Enabled => self.inner.views.resume_stats_collection(),
            }
            otel_info!(
                name: "StatsProvider.StateChanged",
                state = state.to_string()
            );
        }
        Ok(changed)
    }
}

#[cfg(test)]
impl StatsProvider {
    /// An enabled provider that ignores the environment.
    pub(crate) fn new_enabled() -> Self {
        StatsProvider::builder()
            .with_state(StatsCollectionState::Enabled)
            .build()
    }
}

/// Configuration for a [`StatsProvider`].
#[derive(Debug, Default)]
pub struct StatsProviderBuilder {
    state: Option<StatsCollectionState>,
}

impl StatsProviderBuilder {
    /// Sets the initial collection state.
    ///
    /// Overrides the `OTEL_SDK_DISABLED` environment variable.
    pub fn with_state(mut self, state: StatsCollectionState) -> Self {
        self.state = Some(state);
        self
    }

    /// Creates the provider.
    pub fn build(self) -> StatsProvider {
        let state = self.state.unwrap_or_else(state_from_env);
        otel_debug!(
            name: "StatsProvider.Built",
            state = state.to_string()
        );

        StatsProvider {
            inner: Arc::new(StatsProviderInner {
                state: CurrentStatsState::new(state),
                views: MeasureToViewMap::default(),
                transition: Mutex::new(()),
            }),
        }
    }
}

fn state_from_env() -> StatsCollectionState {
    match env::var(OTEL_SDK_DISABLED) {
        Ok(value) if value.trim().eq_ignore_ascii_case("true") => StatsCollectionState::Disabled,
        _ => StatsCollectionState::Enabled,
    }
}
