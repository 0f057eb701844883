// Path: crates/state/src/ledger/mod.rs
//! The in-memory ledger host and its transaction model.

use crate::cursor::MemoryHistoryIter;
use crate::faults::FaultPlan;
use asset_registry_api::history::{HistoryIndex, HistoryIterator};
use asset_registry_api::identity::IdentitySource;
use asset_registry_api::services::LedgerService;
use asset_registry_api::state::StateAccessor;
use asset_registry_types::app::{HistoryTimestamp, Invocation, InvocationResult, MutationRecord};
use asset_registry_types::error::StateError;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// The interval by which the ledger clock advances per transaction.
const TICK_NANOS: i64 = 1_000_000;
const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Errors in driving the ledger's transaction lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Transaction {0} is already in progress")]
    TransactionInProgress(String),
    #[error("No transaction in progress")]
    NoTransaction,
    #[error("Ledger clock cannot advance past {}s {}ns", .0.seconds, .0.nanos)]
    ClockOverflow(HistoryTimestamp),
}

/// The write set of the open transaction. `None` marks a delete.
#[derive(Debug)]
struct PendingTx {
    tx_id: String,
    timestamp: HistoryTimestamp,
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

/// A single-peer ledger held entirely in memory.
///
/// Reads always see committed state, never the open transaction's own writes. On
/// commit every touched key gets exactly one history record, in key order.
#[derive(Debug)]
pub struct MemoryLedger {
    committed: BTreeMap<Vec<u8>, Vec<u8>>,
    history: BTreeMap<Vec<u8>, Vec<MutationRecord>>,
    pending: Option<PendingTx>,
    creator: Vec<u8>,
    faults: FaultPlan,
    open_cursors: Arc<AtomicUsize>,
    next_tx: u64,
    clock: HistoryTimestamp,
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLedger {
    /// An empty ledger whose clock starts at the current wall time.
    pub fn new() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| HistoryTimestamp::new(d.as_secs() as i64, d.subsec_nanos() as i32))
            .unwrap_or_default();
        Self::starting_at(now)
    }

    /// An empty ledger with a fixed clock origin; transaction timestamps are then
    /// fully deterministic.
    pub fn starting_at(clock: HistoryTimestamp) -> Self {
        Self {
            committed: BTreeMap::new(),
            history: BTreeMap::new(),
            pending: None,
            creator: Vec::new(),
            faults: FaultPlan::default(),
            open_cursors: Arc::new(AtomicUsize::new(0)),
            next_tx: 1,
            clock,
        }
    }

    /// Sets the serialized identity returned to the registry as the caller.
    pub fn set_creator(&mut self, creator: impl Into<Vec<u8>>) {
        self.creator = creator.into();
    }

    /// Replaces the active fault plan.
    pub fn inject(&mut self, faults: FaultPlan) {
        self.faults = faults;
    }

    pub fn clear_faults(&mut self) {
        self.faults = FaultPlan::default();
    }

    /// The number of history cursors opened and not yet closed.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    /// The number of history records stored for `key`.
    pub fn history_len(&self, key: &[u8]) -> usize {
        self.history.get(key).map_or(0, Vec::len)
    }

    /// Whether a transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.pending.is_some()
    }

    /// Opens a transaction. Writes until [`commit`](Self::commit) are buffered.
    pub fn begin(
        &mut self,
        tx_id: impl Into<String>,
        timestamp: HistoryTimestamp,
    ) -> Result<(), LedgerError> {
        if let Some(open) = &self.pending {
            return Err(LedgerError::TransactionInProgress(open.tx_id.clone()));
        }
        let tx_id = tx_id.into();
        tracing::debug!(target: "ledger", tx_id = %tx_id, "begin transaction");
        self.pending = Some(PendingTx {
            tx_id,
            timestamp,
            writes: BTreeMap::new(),
        });
        Ok(())
    }

    /// Applies the open transaction and returns the number of keys it touched.
    pub fn commit(&mut self) -> Result<usize, LedgerError> {
        let tx = self.pending.take().ok_or(LedgerError::NoTransaction)?;
        let touched = tx.writes.len();
        for (key, write) in tx.writes {
            let record = match write {
                Some(value) => {
                    self.committed.insert(key.clone(), value.clone());
                    MutationRecord::write(tx.tx_id.clone(), value, tx.timestamp)
                }
                None => {
                    self.committed.remove(&key);
                    MutationRecord::delete(tx.tx_id.clone(), tx.timestamp)
                }
            };
            self.history.entry(key).or_default().push(record);
        }
        tracing::debug!(target: "ledger", tx_id = %tx.tx_id, touched, "committed transaction");
        Ok(touched)
    }

    /// Discards the open transaction's writes. Does nothing when none is open.
    pub fn rollback(&mut self) {
        if let Some(tx) = self.pending.take() {
            tracing::debug!(
                target: "ledger",
                tx_id = %tx.tx_id,
                discarded = tx.writes.len(),
                "rolled back transaction"
            );
        }
    }

    /// Runs `service.init` inside its own transaction.
    pub fn instantiate<S: LedgerService + ?Sized>(
        &mut self,
        service: &S,
    ) -> Result<InvocationResult, LedgerError> {
        self.run(|ledger| service.init(ledger))
    }

    /// Runs one invocation inside a fresh transaction, committing it only on success.
    pub fn execute<S: LedgerService + ?Sized>(
        &mut self,
        service: &S,
        invocation: &Invocation,
    ) -> Result<InvocationResult, LedgerError> {
        self.run(|ledger| service.invoke(ledger, invocation))
    }

    fn run(
        &mut self,
        body: impl FnOnce(&mut Self) -> InvocationResult,
    ) -> Result<InvocationResult, LedgerError> {
        let tx_id = format!("tx-{:08}", self.next_tx);
        let timestamp = self.tick()?;
        self.begin(tx_id, timestamp)?;
        self.next_tx += 1;

        let result = body(self);
        if result.is_success() {
            self.commit()?;
        } else {
            self.rollback();
        }
        Ok(result)
    }

    fn tick(&mut self) -> Result<HistoryTimestamp, LedgerError> {
        let now = self.clock;
        let total = i128::from(now.seconds) * NANOS_PER_SEC
            + i128::from(now.nanos)
            + i128::from(TICK_NANOS);
        let seconds = i64::try_from(total.div_euclid(NANOS_PER_SEC))
            .map_err(|_| LedgerError::ClockOverflow(now))?;
        let nanos = i32::try_from(total.rem_euclid(NANOS_PER_SEC))
            .map_err(|_| LedgerError::ClockOverflow(now))?;
        self.clock = HistoryTimestamp::new(seconds, nanos);
        Ok(now)
    }

    fn pending_writes(&mut self) -> Result<&mut BTreeMap<Vec<u8>, Option<Vec<u8>>>, StateError> {
        self.pending
            .as_mut()
            .map(|tx| &mut tx.writes)
            .ok_or_else(|| StateError::WriteError("no transaction in progress".to_string()))
    }
}

fn check_key(key: &[u8]) -> Result<(), StateError> {
    if key.is_empty() {
        return Err(StateError::Backend("key must not be empty".to_string()));
    }
    Ok(())
}

impl StateAccessor for MemoryLedger {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        self.faults.check_read()?;
        check_key(key)?;
        Ok(self.committed.get(key).cloned())
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.faults.check_write()?;
        check_key(key)?;
        self.pending_writes()?
            .insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.faults.check_write()?;
        check_key(key)?;
        self.pending_writes()?.insert(key.to_vec(), None);
        Ok(())
    }
}

impl HistoryIndex for MemoryLedger {
    fn history_for_key(&self, key: &[u8]) -> Result<Box<dyn HistoryIterator + '_>, StateError> {
        if let Some(message) = &self.faults.fail_history_open {
            return Err(StateError::Backend(message.clone()));
        }
        check_key(key)?;
        let records = self.history.get(key).cloned().unwrap_or_default();
        Ok(Box::new(MemoryHistoryIter::open(
            records,
            self.open_cursors.clone(),
            self.faults.fail_history_after,
            self.faults.fail_cursor_close,
        )))
    }
}

impl IdentitySource for MemoryLedger {
    fn creator(&self) -> Result<Vec<u8>, StateError> {
        if let Some(message) = &self.faults.fail_creator {
            return Err(StateError::Unavailable(message.clone()));
        }
        Ok(self.creator.clone())
    }
}
