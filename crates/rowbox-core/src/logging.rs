//! Logging facilities for rowbox.
//!
//! rowbox uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("rowbox=debug")
//!     .init();
//! ```
//!
//! Structural model changes are logged at `debug` under [`targets::MODEL`].
//! Signal emission is logged at `trace` under [`targets::SIGNAL`].

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "rowbox_core::signal";
    /// List model mutations and lookups.
    pub const MODEL: &str = "rowbox::model";
    /// Responder dispatch.
    pub const RESPONDER: &str = "rowbox::responder";
    /// Configuration loading.
    pub const CONFIG: &str = "rowbox::config";
    /// Operation timing spans.
    pub const PERF: &str = "rowbox::perf";
}

/// A guard for timing one operation.
///
/// Enters an `info`-level span under [`targets::PERF`] for as long as the guard
/// lives, so a subscriber with span timing can report how long the operation
/// took.
///
/// ```
/// use rowbox_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("remove_rows");
///     // ... work ...
/// }
/// ```
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }

    #[test]
    fn test_targets_are_namespaced() {
        for target in [targets::MODEL, targets::RESPONDER, targets::CONFIG, targets::PERF] {
            assert!(target.starts_with("rowbox::"), "unexpected target {target}");
        }
        assert!(targets::SIGNAL.starts_with("rowbox_core::"));
    }
}
