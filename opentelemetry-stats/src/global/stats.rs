use std::sync::{OnceLock, RwLock};

use crate::stats::{StatsProvider, StatsRecorder, ViewManager};
use crate::{otel_error, otel_info};

/// The global `StatsProvider` singleton.
static GLOBAL_STATS_PROVIDER: OnceLock<RwLock<StatsProvider>> = OnceLock::new();

#[inline]
fn global_stats_provider() -> &'static RwLock<StatsProvider> {
    GLOBAL_STATS_PROVIDER.get_or_init(|| RwLock::new(StatsProvider::default()))
}

/// Sets the given [`StatsProvider`] as the current global stats provider.
/// Libraries should NOT call this function. It is intended for applications/executables.
///
/// **NOTE:** Recorders and view managers obtained before this call keep
/// referring to the previous provider.
pub fn set_stats_provider(new_provider: StatsProvider) {
    let mut global_provider = global_stats_provider().write();
    if let Ok(ref mut provider) = global_provider {
        **provider = new_provider;
        otel_info!(name: "StatsProvider.GlobalSet", message = "Global stats provider is set.");
    } else {
        otel_error!(name: "StatsProvider.GlobalSetFailed", message = "Setting global stats provider failed. Stats recorded through the global provider will not be visible.");
    }
}

/// Returns the currently configured global [`StatsProvider`].
///
/// Until [`set_stats_provider`] is called this is a provider built with
/// [`StatsProvider::default`].
pub fn stats_provider() -> StatsProvider {
    let global_provider = global_stats_provider().read();
    if let Ok(provider) = global_provider {
        provider.clone()
    } else {
        otel_error!(name: "StatsProvider.GlobalGetFailed", message = "Getting global stats provider failed. Returning a detached provider.");
        StatsProvider::default()
    }
}

/// Returns a [`StatsRecorder`] of the global provider.
///
/// This is a more convenient way of expressing `global::stats_provider().stats_recorder()`.
pub fn stats_recorder() -> StatsRecorder {
    stats_provider().stats_recorder()
}

/// Returns a [`ViewManager`] of the global provider.
///
/// This is a more convenient way of expressing `global::stats_provider().view_manager()`.
pub fn view_manager() -> ViewManager {
    stats_provider().view_manager()
}
