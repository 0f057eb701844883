// Path: crates/api/src/host/mod.rs
//! The combined capability set a host runtime hands to the registry per invocation.

use crate::history::HistoryIndex;
use crate::identity::IdentitySource;
use crate::state::StateAccessor;

/// Everything the registry needs from its host for one invocation.
///
/// This trait has no methods of its own; any type that provides state access, a
/// history index, and the caller identity is a `LedgerHost`.
pub trait LedgerHost: StateAccessor + HistoryIndex + IdentitySource {}

// Blanket implementation so hosts only implement the three capability traits.
impl<T: StateAccessor + HistoryIndex + IdentitySource + ?Sized> LedgerHost for T {}
