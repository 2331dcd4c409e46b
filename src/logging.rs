//! Logging abstraction layer.
//!
//! The coordinator reports expected conditions (container not mounted yet,
//! nothing to pop, no modal stack) through a diagnostic log channel instead
//! of returning errors. These macros route that channel to either the
//! [`log`](https://docs.rs/log) or [`tracing`](https://docs.rs/tracing)
//! crate. The two features are **mutually exclusive**, enable at most one.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! Every record is emitted under the [`TARGET`] target, so applications can
//! filter navigation diagnostics with e.g. `RUST_LOG=navigation=debug`.
//!
//! ```ignore
//! use stack_navigation::{debug_log, warn_log};
//!
//! debug_log!("navigate failed because the container is not ready: {}", path);
//! warn_log!("Could not build replace action for '{}': {}", path, err);
//! ```

/// Log target shared by every navigation record.
pub const TARGET: &str = "navigation";

/// Emit a **trace**-level navigation record.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(target: $crate::logging::TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!(target: $crate::logging::TARGET, $($arg)*);
    };
}

/// Emit a **debug**-level navigation record.
///
/// Used for the frequent, expected "not yet" and no-op conditions.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(target: $crate::logging::TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!(target: $crate::logging::TARGET, $($arg)*);
    };
}

/// Emit an **info**-level navigation record.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!(target: $crate::logging::TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::info!(target: $crate::logging::TARGET, $($arg)*);
    };
}

/// Emit a **warn**-level navigation record.
///
/// Used when an operation degrades to a fallback because the navigation
/// tree did not have the expected shape.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!(target: $crate::logging::TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!(target: $crate::logging::TARGET, $($arg)*);
    };
}

/// Emit an **error**-level navigation record.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!(target: $crate::logging::TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::error!(target: $crate::logging::TARGET, $($arg)*);
    };
}
