// Path: crates/api/src/services/mod.rs
//! Traits for the registry service and the handlers it dispatches invocations to.

use crate::host::LedgerHost;
use asset_registry_types::app::{Invocation, InvocationResult};
use asset_registry_types::error::RegistryError;

/// A single named registry operation.
///
/// The dispatcher owns a table of handlers keyed by [`name`](Self::name); adding an
/// operation means registering another implementation of this trait.
pub trait InvocationHandler: Send + Sync {
    /// The exact function name this handler answers to.
    fn name(&self) -> &'static str;

    /// Runs the operation and returns the success payload.
    ///
    /// Implementations validate `args` before touching `host`.
    fn handle(&self, host: &mut dyn LedgerHost, args: &[String]) -> Result<Vec<u8>, RegistryError>;
}

/// A complete service the host instantiates once and invokes per transaction.
pub trait LedgerService {
    /// Called once when the service is instantiated on the ledger.
    fn init(&self, host: &mut dyn LedgerHost) -> InvocationResult;

    /// Runs one invocation. Failures are reported in the result, never by panicking.
    fn invoke(&self, host: &mut dyn LedgerHost, invocation: &Invocation) -> InvocationResult;
}
