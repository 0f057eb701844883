// Path: crates/api/src/history/mod.rs

//! Forward-only access to the host's per-key mutation history.

use asset_registry_types::app::MutationRecord;
use asset_registry_types::error::StateError;

/// A finite, forward-only cursor over the mutation records of one key.
///
/// Records are yielded oldest-to-newest in the order the host produced them.
/// The cursor holds a host-side resource that must be released with [`close`](Self::close);
/// wrap it in a [`HistoryGuard`] to make that happen on every exit path.
pub trait HistoryIterator: Iterator<Item = Result<MutationRecord, StateError>> {
    /// Releases the host-side cursor. Calling it more than once must be harmless.
    fn close(&mut self) -> Result<(), StateError>;
}

/// The host's history index.
pub trait HistoryIndex {
    /// Opens a history cursor for `key`. A key with no mutations yields an empty cursor.
    fn history_for_key(&self, key: &[u8]) -> Result<Box<dyn HistoryIterator + '_>, StateError>;
}

impl<T: HistoryIndex + ?Sized> HistoryIndex for Box<T> {
    fn history_for_key(&self, key: &[u8]) -> Result<Box<dyn HistoryIterator + '_>, StateError> {
        (**self).history_for_key(key)
    }
}

/// An RAII guard that owns a history cursor and closes it when dropped.
///
/// Dropping the guard after a full drain, after an early `return` on an error, or
/// during unwinding all release the cursor exactly once.
pub struct HistoryGuard<'a> {
    cursor: Option<Box<dyn HistoryIterator + 'a>>,
}

impl<'a> HistoryGuard<'a> {
    /// Takes ownership of an open cursor.
    pub fn new(cursor: Box<dyn HistoryIterator + 'a>) -> Self {
        Self {
            cursor: Some(cursor),
        }
    }

    /// Opens the history of `key` on `index` and guards the resulting cursor.
    pub fn open<H: HistoryIndex + ?Sized>(index: &'a H, key: &[u8]) -> Result<Self, StateError> {
        Ok(Self::new(index.history_for_key(key)?))
    }

    /// Closes the cursor now and reports the host's answer.
    pub fn close(mut self) -> Result<(), StateError> {
        match self.cursor.take() {
            Some(mut cursor) => cursor.close(),
            None => Ok(()),
        }
    }
}

impl Iterator for HistoryGuard<'_> {
    type Item = Result<MutationRecord, StateError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.as_mut()?.next()
    }
}

impl Drop for HistoryGuard<'_> {
    fn drop(&mut self) {
        if let Some(mut cursor) = self.cursor.take() {
            if let Err(e) = cursor.close() {
                tracing::warn!(target: "history", error = %e, "failed to release history cursor");
            }
        }
    }
}
