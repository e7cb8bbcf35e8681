//! Logging facilities for Horizon Physics.
//!
//! Horizon Physics uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_physics=debug,horizon_physics_core=trace")
//!         .init();
//! }
//! ```
//!
//! The [`targets`] constants name the subsystems so they can be filtered
//! individually.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_physics_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_physics_core::signal";
    /// Property system target.
    pub const PROPERTY: &str = "horizon_physics_core::property";
    /// Change flag and batch notification target.
    pub const CHANGE: &str = "horizon_physics_core::change";
    /// Unit quantity target.
    pub const QUANTITY: &str = "horizon_physics::quantity";
    /// Composite models target.
    pub const MODEL: &str = "horizon_physics::model";
    /// Settings persistence target.
    pub const CONFIG: &str = "horizon_physics::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations such as loading
/// settings or applying a batch of changes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_physics::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros with consistent
/// target naming.
#[macro_export]
macro_rules! physics_trace {
    ($($arg:tt)*) => {
        $crate::tracing::trace!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! physics_debug {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! physics_info {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! physics_warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! physics_error {
    ($($arg:tt)*) => {
        $crate::tracing::error!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
        crate::physics_debug!(value = 1.0, "inside span");
    }

    #[test]
    fn test_macros_expand_at_every_level() {
        crate::physics_trace!("trace");
        crate::physics_info!(count = 2, "info");
        crate::physics_warn!("warn");
        crate::physics_error!(reason = "none", "error");
    }

    #[test]
    fn test_targets_are_namespaced() {
        assert!(targets::SIGNAL.starts_with(targets::CORE));
        assert!(targets::CHANGE.starts_with(targets::CORE));
        assert!(targets::QUANTITY.starts_with("horizon_physics::"));
    }
}
