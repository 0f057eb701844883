// Path: crates/state/src/lib.rs
#![forbid(unsafe_code)]
//! # Asset Registry State
//!
//! An in-memory ledger that implements [`LedgerHost`](asset_registry_api::host::LedgerHost)
//! the way a single peer would: committed world state, a per-key history log, and
//! transactions whose writes become visible only on commit.

pub mod cursor;
pub mod faults;
pub mod ledger;

pub use faults::FaultPlan;
pub use ledger::{LedgerError, MemoryLedger};
