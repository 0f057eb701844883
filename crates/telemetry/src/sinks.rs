// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling core logic from the backend.

/// A no-op sink for use in tests where metrics are not needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopSink;

/// A sink for registry invocation metrics.
pub trait RegistryMetricsSink: Send + Sync + std::fmt::Debug {
    /// Counts an invocation of `function`, whether or not it is a known name.
    fn inc_invocations(&self, function: &str);
    /// Counts an invocation of `function` that returned a failure result.
    fn inc_failures(&self, function: &str);
    /// Counts a caller identity that could not be decoded or parsed.
    fn inc_identity_failures(&self);
    /// Observes the number of records drained by one history query.
    fn observe_history_records(&self, count: u64);
}
impl RegistryMetricsSink for NopSink {
    fn inc_invocations(&self, _function: &str) {}
    fn inc_failures(&self, _function: &str) {}
    fn inc_identity_failures(&self) {}
    fn observe_history_records(&self, _count: u64) {}
}
