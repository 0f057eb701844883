// Path: crates/api/src/identity/mod.rs
//! Access to the serialized identity of the transaction creator.

use asset_registry_types::error::StateError;

/// Supplies the caller identity the host attached to the current transaction.
pub trait IdentitySource {
    /// Returns the serialized identity envelope of the transaction creator.
    fn creator(&self) -> Result<Vec<u8>, StateError>;
}

impl<T: IdentitySource + ?Sized> IdentitySource for Box<T> {
    fn creator(&self) -> Result<Vec<u8>, StateError> {
        (**self).creator()
    }
}
