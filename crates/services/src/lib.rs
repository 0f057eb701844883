// Path: crates/services/src/lib.rs
#![forbid(unsafe_code)]

pub mod identity;
pub mod registry;

pub use registry::AssetRegistry;
