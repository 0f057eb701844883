// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.
//!
//! Each [`PrometheusSink`] owns its own [`Registry`], so several sinks can coexist in
//! one process (one per test, one per node run) without name clashes.

use crate::init::TelemetryError;
use crate::sinks::RegistryMetricsSink;
use prometheus::{
    exponential_buckets, Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts,
    Registry, TextEncoder,
};
use std::collections::BTreeMap;

const INVOCATIONS_TOTAL: &str = "asset_registry_invocations_total";
const FAILURES_TOTAL: &str = "asset_registry_invocation_failures_total";
const IDENTITY_FAILURES_TOTAL: &str = "asset_registry_identity_failures_total";
const HISTORY_RECORDS: &str = "asset_registry_history_records";

/// Per-function invocation counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FunctionTally {
    pub invocations: u64,
    pub failures: u64,
}

/// A point-in-time reading of a [`PrometheusSink`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallySnapshot {
    pub functions: BTreeMap<String, FunctionTally>,
    pub identity_failures: u64,
    pub history_queries: u64,
    pub history_records: u64,
}

impl TallySnapshot {
    pub fn total_invocations(&self) -> u64 {
        self.functions.values().map(|f| f.invocations).sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.functions.values().map(|f| f.failures).sum()
    }
}

/// Registry metrics backed by a private Prometheus registry.
#[derive(Clone)]
pub struct PrometheusSink {
    registry: Registry,
    invocations: IntCounterVec,
    failures: IntCounterVec,
    identity_failures: IntCounter,
    history_records: Histogram,
}

impl std::fmt::Debug for PrometheusSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusSink")
            .field("identity_failures", &self.identity_failures.get())
            .field("history_queries", &self.history_records.get_sample_count())
            .finish_non_exhaustive()
    }
}

impl PrometheusSink {
    pub fn new() -> Result<Self, TelemetryError> {
        let registry = Registry::new();

        let invocations = IntCounterVec::new(
            Opts::new(INVOCATIONS_TOTAL, "Total registry invocations by function name."),
            &["function"],
        )?;
        let failures = IntCounterVec::new(
            Opts::new(FAILURES_TOTAL, "Total failed registry invocations by function name."),
            &["function"],
        )?;
        let identity_failures = IntCounter::new(
            IDENTITY_FAILURES_TOTAL,
            "Total caller identities that could not be decoded or parsed.",
        )?;
        let history_records = Histogram::with_opts(
            HistogramOpts::new(HISTORY_RECORDS, "Records drained per listHistory query.")
                .buckets(exponential_buckets(1.0, 2.0, 12)?),
        )?;

        registry.register(Box::new(invocations.clone()))?;
        registry.register(Box::new(failures.clone()))?;
        registry.register(Box::new(identity_failures.clone()))?;
        registry.register(Box::new(history_records.clone()))?;

        Ok(Self {
            registry,
            invocations,
            failures,
            identity_failures,
            history_records,
        })
    }

    /// The sink's metrics in the Prometheus text exposition format.
    pub fn encode_text(&self) -> Result<String, TelemetryError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Reads every counter back into plain numbers.
    pub fn snapshot(&self) -> TallySnapshot {
        let mut functions: BTreeMap<String, FunctionTally> = BTreeMap::new();
        for family in self.registry.gather() {
            let is_failure = match family.get_name() {
                INVOCATIONS_TOTAL => false,
                FAILURES_TOTAL => true,
                _ => continue,
            };
            for metric in family.get_metric() {
                let Some(function) = metric
                    .get_label()
                    .iter()
                    .find(|label| label.get_name() == "function")
                    .map(|label| label.get_value().to_string())
                else {
                    continue;
                };
                let count = metric.get_counter().get_value() as u64;
                let entry = functions.entry(function).or_default();
                if is_failure {
                    entry.failures = count;
                } else {
                    entry.invocations = count;
                }
            }
        }

        TallySnapshot {
            functions,
            identity_failures: self.identity_failures.get(),
            history_queries: self.history_records.get_sample_count(),
            history_records: self.history_records.get_sample_sum() as u64,
        }
    }
}

impl RegistryMetricsSink for PrometheusSink {
    fn inc_invocations(&self, function: &str) {
        self.invocations.with_label_values(&[function]).inc();
    }

    fn inc_failures(&self, function: &str) {
        self.failures.with_label_values(&[function]).inc();
    }

    fn inc_identity_failures(&self) {
        self.identity_failures.inc();
    }

    fn observe_history_records(&self, count: u64) {
        self.history_records.observe(count as f64);
    }
}
