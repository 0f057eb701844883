// Path: crates/services/src/registry/assets.rs
//! Point read, upsert, and delete handlers over the host's world state.

use asset_registry_api::host::LedgerHost;
use asset_registry_api::services::InvocationHandler;
use asset_registry_api::state::StateAccessor;
use asset_registry_types::error::RegistryError;

pub const QUERY_ASSET: &str = "queryAsset";
pub const MAKE_ASSET: &str = "makeAsset";
pub const CHANGE_ASSET: &str = "changeAsset";
pub const DELETE_ASSET: &str = "deleteAsset";

/// Reads the value stored under `key`.
///
/// A stored value of zero length is reported as `NotFound`, exactly like an absent
/// key. Callers depend on this, so an empty asset cannot be told apart from a missing one.
pub fn read_asset<S: StateAccessor + ?Sized>(
    state: &S,
    key: &str,
) -> Result<Vec<u8>, RegistryError> {
    let value = state
        .get(key.as_bytes())
        .map_err(|source| RegistryError::Store {
            op: "GetState",
            source,
        })?;
    match value {
        Some(bytes) if !bytes.is_empty() => {
            tracing::info!(
                target: "registry",
                key,
                "OK Retrieved KEY: >{}< VAL: >{}<",
                key,
                String::from_utf8_lossy(&bytes)
            );
            Ok(bytes)
        }
        _ => Err(RegistryError::NotFound(key.to_string())),
    }
}

/// Stores `value` under `key` as a JSON string literal and returns the stored bytes.
pub fn write_asset<S: StateAccessor + ?Sized>(
    state: &mut S,
    key: &str,
    value: &str,
) -> Result<Vec<u8>, RegistryError> {
    let encoded = serde_json::to_vec(value).map_err(|e| RegistryError::Encoding {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    state
        .insert(key.as_bytes(), &encoded)
        .map_err(|source| RegistryError::Store {
            op: "PutState",
            source,
        })?;
    Ok(encoded)
}

/// Removes `key` from the current state. Removing an absent key succeeds.
pub fn remove_asset<S: StateAccessor + ?Sized>(
    state: &mut S,
    key: &str,
) -> Result<(), RegistryError> {
    state
        .delete(key.as_bytes())
        .map_err(|source| RegistryError::Store {
            op: "DelState",
            source,
        })
}

/// `queryAsset(key)`: returns the raw stored bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryAsset;

impl InvocationHandler for QueryAsset {
    fn name(&self) -> &'static str {
        QUERY_ASSET
    }

    fn handle(&self, host: &mut dyn LedgerHost, args: &[String]) -> Result<Vec<u8>, RegistryError> {
        let [key] = args else {
            return Err(RegistryError::Arity {
                expected: 1,
                hint: Some("Please provide KEY of the asset."),
            });
        };
        read_asset(&*host, key)
    }
}

/// `makeAsset(key, value)` and `changeAsset(key, value)`: unconditional upsert.
///
/// The two names share one implementation; `changeAsset` does not require the key
/// to exist already.
#[derive(Debug, Clone, Copy)]
pub struct PutAsset {
    name: &'static str,
    verb: &'static str,
    hint: Option<&'static str>,
}

impl PutAsset {
    pub fn make() -> Self {
        Self {
            name: MAKE_ASSET,
            verb: "Added",
            hint: Some("Please provide KEY and VAL of the asset."),
        }
    }

    pub fn change() -> Self {
        Self {
            name: CHANGE_ASSET,
            verb: "Changed",
            hint: None,
        }
    }
}

impl InvocationHandler for PutAsset {
    fn name(&self) -> &'static str {
        self.name
    }

    fn handle(&self, host: &mut dyn LedgerHost, args: &[String]) -> Result<Vec<u8>, RegistryError> {
        let [key, value] = args else {
            return Err(RegistryError::Arity {
                expected: 2,
                hint: self.hint,
            });
        };
        let stored = write_asset(host, key, value)?;
        tracing::info!(
            target: "registry",
            key = %key,
            "{} KEY={} VAL={}",
            self.verb,
            key,
            String::from_utf8_lossy(&stored)
        );
        Ok(Vec::new())
    }
}

/// `deleteAsset(key)`: idempotent removal; the key's history keeps a delete record.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeleteAsset;

impl InvocationHandler for DeleteAsset {
    fn name(&self) -> &'static str {
        DELETE_ASSET
    }

    fn handle(&self, host: &mut dyn LedgerHost, args: &[String]) -> Result<Vec<u8>, RegistryError> {
        let [key] = args else {
            return Err(RegistryError::Arity {
                expected: 1,
                hint: None,
            });
        };
        remove_asset(host, key)?;
        tracing::info!(target: "registry", key = %key, "Deleted KEY={}", key);
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_registry_types::error::StateError;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapState {
        data: HashMap<Vec<u8>, Vec<u8>>,
        fail: bool,
    }

    impl StateAccessor for MapState {
        fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
            if self.fail {
                return Err(StateError::Backend("unreachable peer".into()));
            }
            Ok(self.data.get(key).cloned())
        }
        fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
            if self.fail {
                return Err(StateError::WriteError("read-only snapshot".into()));
            }
            self.data.insert(key.to_vec(), value.to_vec());
            Ok(())
        }
        fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
            if self.fail {
                return Err(StateError::WriteError("read-only snapshot".into()));
            }
            self.data.remove(key);
            Ok(())
        }
    }

    #[test]
    fn write_then_read_returns_json_literal() {
        let mut state = MapState::default();
        write_asset(&mut state, "car1", "red \"fast\"").unwrap();
        assert_eq!(
            read_asset(&state, "car1").unwrap(),
            br#""red \"fast\"""#.to_vec()
        );
    }

    #[test]
    fn empty_stored_value_reads_as_not_found() {
        let mut state = MapState::default();
        state.data.insert(b"blank".to_vec(), Vec::new());
        assert_eq!(
            read_asset(&state, "blank"),
            Err(RegistryError::NotFound("blank".into()))
        );
        assert_eq!(
            read_asset(&state, "never"),
            Err(RegistryError::NotFound("never".into()))
        );
    }

    #[test]
    fn store_failures_name_the_failing_operation() {
        let mut state = MapState {
            fail: true,
            ..Default::default()
        };
        assert!(matches!(
            read_asset(&state, "k"),
            Err(RegistryError::Store { op: "GetState", .. })
        ));
        assert!(matches!(
            write_asset(&mut state, "k", "v"),
            Err(RegistryError::Store { op: "PutState", .. })
        ));
        assert!(matches!(
            remove_asset(&mut state, "k"),
            Err(RegistryError::Store { op: "DelState", .. })
        ));
    }

    #[test]
    fn remove_absent_key_succeeds() {
        let mut state = MapState::default();
        remove_asset(&mut state, "ghost").unwrap();
    }
}
