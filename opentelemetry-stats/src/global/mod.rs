//! Utilities for working with the process-wide stats provider.
//!
//! Engine types never consult global state; a [`StatsProvider`] is an
//! ordinary value that can be created as often as needed. This module only
//! holds the one instance applications share.
//!
//! ```
//! use opentelemetry_stats::global;
//! use opentelemetry_stats::stats::{StatsCollectionState, StatsProvider};
//!
//! global::set_stats_provider(
//!     StatsProvider::builder()
//!         .with_state(StatsCollectionState::Enabled)
//!         .build(),
//! );
//!
//! let recorder = global::stats_recorder();
//! let views = global::view_manager();
//! assert!(views.all_exported_views().is_empty());
//! # drop(recorder);
//! ```
//!
//! [`StatsProvider`]: crate::stats::StatsProvider

mod internal_logging;
mod stats;

pub use stats::{set_stats_provider, stats_provider, stats_recorder, view_manager};
