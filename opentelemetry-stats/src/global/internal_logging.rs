#![allow(unused_macros)]
//! Self-diagnostics for the stats crate.
//!
//! The `otel_*!` macros are meant for this crate and for exporters built on
//! top of it, not for application logging. With the `internal-logs` feature
//! each event is forwarded to `tracing` under the crate's target, with the
//! event name duplicated as a `name` field so subscribers that drop metadata
//! still see it. Unit tests print events to stdout instead, which shows up
//! under `--nocapture`.

/// Shared expansion for the leveled macros below.
#[doc(hidden)]
#[macro_export]
macro_rules! __stats_log {
    ($level:ident, $name:expr $(, $key:ident = $value:expr)*) => {{
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::$level!(
                name: $name,
                target: env!("CARGO_PKG_NAME"),
                name = $name
                $(, $key = $value)*
            );
        }

        #[cfg(test)]
        {
            print!("otel_{}: name={}", stringify!($level), $name);
            $(
                print!(", {}={}", stringify!($key), $value);
            )*
            println!();
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        {
            let _ = ($name $(, $value)*);
        }
    }};
}

/// Logs an informational event, such as a view being registered.
///
/// ```rust
/// use opentelemetry_stats::otel_info;
/// otel_info!(name: "ViewManager.ViewRegistered", view_name = "rpc/latency");
/// ```
#[macro_export]
macro_rules! otel_info {
    (name: $name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::__stats_log!(info, $name $(, $key = $value)*)
    };
}

/// Logs a rejected operation the caller can recover from.
///
/// ```rust
/// use opentelemetry_stats::otel_warn;
/// otel_warn!(name: "ViewManager.ViewConflict", view_name = "rpc/latency");
/// ```
#[macro_export]
macro_rules! otel_warn {
    (name: $name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::__stats_log!(warn, $name $(, $key = $value)*)
    };
}

/// Logs a silently skipped step, such as a recording made while disabled.
///
/// ```rust
/// use opentelemetry_stats::otel_debug;
/// otel_debug!(name: "StatsRecorder.RecordingDropped", measures = 2);
/// ```
#[macro_export]
macro_rules! otel_debug {
    (name: $name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::__stats_log!(debug, $name $(, $key = $value)*)
    };
}

/// Logs an internal failure that was papered over, such as a poisoned lock.
///
/// ```rust
/// use opentelemetry_stats::otel_error;
/// otel_error!(name: "StatsProvider.GlobalGetFailed");
/// ```
#[macro_export]
macro_rules! otel_error {
    (name: $name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::__stats_log!(error, $name $(, $key = $value)*)
    };
}
