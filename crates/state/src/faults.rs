// Path: crates/state/src/faults.rs
//! Injected host failures for exercising the registry's error paths.

use asset_registry_types::error::StateError;

/// Failures the [`MemoryLedger`](crate::MemoryLedger) reports instead of serving a call.
///
/// Each message is returned verbatim inside the matching [`StateError`] variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultPlan {
    /// Fails every `get` with `StateError::Backend`.
    pub fail_reads: Option<String>,
    /// Fails every `insert` and `delete` with `StateError::WriteError`.
    pub fail_writes: Option<String>,
    /// Fails opening a history cursor with `StateError::Backend`.
    pub fail_history_open: Option<String>,
    /// Makes history cursors yield `StateError::Iterator` after this many records.
    pub fail_history_after: Option<usize>,
    /// Makes the first `close` of each history cursor report an error.
    pub fail_cursor_close: bool,
    /// Fails reading the caller identity with `StateError::Unavailable`.
    pub fail_creator: Option<String>,
}

impl FaultPlan {
    /// A plan that fails every read.
    pub fn failing_reads(message: impl Into<String>) -> Self {
        Self {
            fail_reads: Some(message.into()),
            ..Self::default()
        }
    }

    /// A plan that fails every write.
    pub fn failing_writes(message: impl Into<String>) -> Self {
        Self {
            fail_writes: Some(message.into()),
            ..Self::default()
        }
    }

    /// A plan whose history cursors break after `records` records.
    pub fn history_breaks_after(records: usize) -> Self {
        Self {
            fail_history_after: Some(records),
            ..Self::default()
        }
    }

    pub(crate) fn check_read(&self) -> Result<(), StateError> {
        match &self.fail_reads {
            Some(message) => Err(StateError::Backend(message.clone())),
            None => Ok(()),
        }
    }

    pub(crate) fn check_write(&self) -> Result<(), StateError> {
        match &self.fail_writes {
            Some(message) => Err(StateError::WriteError(message.clone())),
            None => Ok(()),
        }
    }
}
