// Path: crates/api/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
//! # Asset Registry API
//!
//! Core traits describing what the registry needs from its host runtime: a
//! key-value state store, a per-key history index, and the caller's identity.
//! This crate defines the stable contract between the registry logic and any
//! host that embeds it.

pub mod history;
pub mod host;
pub mod identity;
pub mod services;
pub mod state;

