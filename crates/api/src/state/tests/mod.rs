// Path: crates/api/src/state/tests/mod.rs

#[cfg(test)]
mod basic_state_tests {
    use crate::state::StateAccessor;
    use asset_registry_types::error::StateError;
    use std::collections::HashMap;

    // Mock state store for testing
    #[derive(Default)]
    struct MockState {
        data: HashMap<Vec<u8>, Vec<u8>>,
    }

    impl StateAccessor for MockState {
        fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
            Ok(self.data.get(key).cloned())
        }

        fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
            self.data.insert(key.to_vec(), value.to_vec());
            Ok(())
        }

        fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
            self.data.remove(key);
            Ok(())
        }
    }

    #[test]
    fn test_boxed_accessor_forwards_calls() {
        let mut state: Box<dyn StateAccessor> = Box::new(MockState::default());

        state.insert(b"key1", b"value1").unwrap();
        assert_eq!(state.get(b"key1").unwrap(), Some(b"value1".to_vec()));

        state.delete(b"key1").unwrap();
        assert_eq!(state.get(b"key1").unwrap(), None);

        // Deleting an absent key is a no-op.
        state.delete(b"missing").unwrap();
    }

    fn write_through<S: StateAccessor + ?Sized>(state: &mut S) -> Result<(), StateError> {
        state.insert(b"a", b"1")?;
        state.insert(b"a", b"2")?;
        Ok(())
    }

    #[test]
    fn test_generic_helpers_accept_unsized_accessors() {
        let mut boxed: Box<dyn StateAccessor> = Box::new(MockState::default());
        write_through(boxed.as_mut()).unwrap();
        assert_eq!(boxed.get(b"a").unwrap(), Some(b"2".to_vec()));
    }
}
