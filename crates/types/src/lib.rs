// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Asset Registry Types
//!
//! The foundational crate of the asset registry workspace. It holds the data
//! structures exchanged with the host runtime (mutation records, identity
//! envelopes, invocation results), the configuration objects, and the error
//! enums shared by every other crate.
//!
//! ## Architectural Role
//!
//! `asset-registry-types` has no dependency on any other workspace crate, so the
//! host-facing traits in `asset-registry-api` and the business logic in
//! `asset-registry-services` can both build on it without cycles.

/// Records, envelopes, and invocation types exchanged with the host runtime.
pub mod app;
/// Configuration structures for the registry, telemetry, and node.
pub mod config;
/// A unified set of all error types used across the registry.
pub mod error;
