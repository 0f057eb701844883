// Path: crates/services/src/registry/mod.rs
//! The asset registry service and its function dispatcher.

use crate::identity::log_caller_identity;
use asset_registry_api::host::LedgerHost;
use asset_registry_api::services::{InvocationHandler, LedgerService};
use asset_registry_telemetry::sinks::{NopSink, RegistryMetricsSink};
use asset_registry_types::app::{Invocation, InvocationResult};
use asset_registry_types::config::RegistryConfig;
use asset_registry_types::error::RegistryError;
use std::collections::BTreeMap;
use std::sync::Arc;

pub mod assets;
pub mod history;

pub use assets::{DeleteAsset, PutAsset, QueryAsset};
pub use history::ListHistory;

/// A transactional key/value asset store with per-key history.
///
/// Each invocation inspects the caller identity (best effort), then routes the
/// function name to exactly one registered handler. Unknown names fail with a fixed
/// message without touching the host.
pub struct AssetRegistry {
    config: RegistryConfig,
    handlers: BTreeMap<&'static str, Box<dyn InvocationHandler>>,
    metrics: Arc<dyn RegistryMetricsSink>,
}

impl AssetRegistry {
    /// Creates a registry with the five built-in functions and no metrics.
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_metrics(config, Arc::new(NopSink))
    }

    /// Creates a registry that reports to `metrics`.
    pub fn with_metrics(config: RegistryConfig, metrics: Arc<dyn RegistryMetricsSink>) -> Self {
        let zone = config.timestamp_zone;
        let mut registry = Self {
            config,
            handlers: BTreeMap::new(),
            metrics: metrics.clone(),
        };
        registry.register(Box::new(QueryAsset));
        registry.register(Box::new(PutAsset::make()));
        registry.register(Box::new(PutAsset::change()));
        registry.register(Box::new(DeleteAsset));
        registry.register(Box::new(ListHistory::new(zone, metrics)));
        registry
    }

    /// Adds a handler under its own name and returns the one it replaced, if any.
    pub fn register(
        &mut self,
        handler: Box<dyn InvocationHandler>,
    ) -> Option<Box<dyn InvocationHandler>> {
        self.handlers.insert(handler.name(), handler)
    }

    /// The registered function names in lexical order.
    pub fn functions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    fn inspect_identity(&self, host: &dyn LedgerHost) {
        if self.config.inspect_identity {
            log_caller_identity(host, self.metrics.as_ref());
        }
    }

    fn dispatch(
        &self,
        host: &mut dyn LedgerHost,
        invocation: &Invocation,
    ) -> Result<Vec<u8>, RegistryError> {
        match self.handlers.get(invocation.function.as_str()) {
            Some(handler) => handler.handle(host, &invocation.args),
            None => Err(RegistryError::UnknownFunction(invocation.function.clone())),
        }
    }
}

impl LedgerService for AssetRegistry {
    fn init(&self, host: &mut dyn LedgerHost) -> InvocationResult {
        tracing::info!(target: "registry", "Calling instantiate method.");
        self.inspect_identity(host);
        InvocationResult::success(Vec::new())
    }

    fn invoke(&self, host: &mut dyn LedgerHost, invocation: &Invocation) -> InvocationResult {
        self.inspect_identity(host);

        let function = invocation.function.as_str();
        tracing::info!(target: "registry", function, "Function name: {}", function);
        self.metrics.inc_invocations(function);

        let outcome = self.dispatch(host, invocation);
        if let Err(e) = &outcome {
            tracing::warn!(target: "registry", function, error = %e, "invocation failed");
            self.metrics.inc_failures(function);
        }
        InvocationResult::from(outcome)
    }
}
