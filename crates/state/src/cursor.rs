// Path: crates/state/src/cursor.rs
//! The history cursor handed out by the in-memory ledger.

use asset_registry_api::history::HistoryIterator;
use asset_registry_types::app::MutationRecord;
use asset_registry_types::error::StateError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A snapshot of one key's history, taken when the cursor was opened.
///
/// The cursor counts itself in a shared gauge while open. Closing it (once or many
/// times) decrements the gauge exactly once; a cursor that is dropped without being
/// closed stays counted, which is how tests detect a leaked cursor.
#[derive(Debug)]
pub struct MemoryHistoryIter {
    records: std::vec::IntoIter<MutationRecord>,
    yielded: usize,
    fail_after: Option<usize>,
    broken: bool,
    fail_close: bool,
    open: Option<Arc<AtomicUsize>>,
}

impl MemoryHistoryIter {
    pub(crate) fn open(
        records: Vec<MutationRecord>,
        gauge: Arc<AtomicUsize>,
        fail_after: Option<usize>,
        fail_close: bool,
    ) -> Self {
        gauge.fetch_add(1, Ordering::SeqCst);
        Self {
            records: records.into_iter(),
            yielded: 0,
            fail_after,
            broken: false,
            fail_close,
            open: Some(gauge),
        }
    }
}

impl Iterator for MemoryHistoryIter {
    type Item = Result<MutationRecord, StateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.broken || self.open.is_none() {
            return None;
        }
        if self.fail_after == Some(self.yielded) {
            self.broken = true;
            return Some(Err(StateError::Iterator(format!(
                "cursor failed after {} records",
                self.yielded
            ))));
        }
        let record = self.records.next()?;
        self.yielded += 1;
        Some(Ok(record))
    }
}

impl HistoryIterator for MemoryHistoryIter {
    fn close(&mut self) -> Result<(), StateError> {
        let Some(gauge) = self.open.take() else {
            return Ok(());
        };
        gauge.fetch_sub(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(StateError::Backend("cursor close failed".to_string()));
        }
        Ok(())
    }
}
