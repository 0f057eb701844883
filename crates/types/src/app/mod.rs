// Path: crates/types/src/app/mod.rs
//! Application-level data structures exchanged between the registry and its host.

mod history;
mod identity;
mod invocation;

pub use history::*;
pub use identity::*;
pub use invocation::*;
