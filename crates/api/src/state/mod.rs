// Path: crates/api/src/state/mod.rs
//! The point-access interface to the host's world state.

use asset_registry_types::error::StateError;

#[cfg(test)]
mod tests;

/// A dyn-safe trait for reading and writing the host's current world state.
///
/// Keys are opaque byte strings. Implementations decide when writes become
/// visible; a host that buffers them until commit is fully compatible.
pub trait StateAccessor {
    /// Gets a value by key. Returns `Ok(None)` for a key that is absent or deleted.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError>;
    /// Inserts or replaces the value stored under a key.
    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError>;
    /// Deletes a key. Deleting an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<(), StateError>;
}

impl<T: StateAccessor + ?Sized> StateAccessor for Box<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        (**self).get(key)
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        (**self).insert(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        (**self).delete(key)
    }
}
