// Path: crates/types/src/app/history.rs
//! Mutation records surfaced by the host's history index.

/// The commit time of a mutation, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct HistoryTimestamp {
    /// Seconds since the Unix epoch.
    pub seconds: i64,
    /// Sub-second component in nanoseconds.
    pub nanos: i32,
}

impl HistoryTimestamp {
    /// Creates a timestamp from its two components.
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }
}

/// One historical write or delete affecting a key.
///
/// Exactly one of {`value` is meaningful, `is_delete` is set} holds: delete records
/// carry an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// The identifier of the transaction that produced the mutation.
    pub tx_id: String,
    /// The bytes written by the transaction. Empty for deletes.
    pub value: Vec<u8>,
    /// When the transaction committed.
    pub timestamp: HistoryTimestamp,
    /// Whether the mutation removed the key.
    pub is_delete: bool,
}

impl MutationRecord {
    /// A record for a transaction that wrote `value` to the key.
    pub fn write(
        tx_id: impl Into<String>,
        value: impl Into<Vec<u8>>,
        timestamp: HistoryTimestamp,
    ) -> Self {
        Self {
            tx_id: tx_id.into(),
            value: value.into(),
            timestamp,
            is_delete: false,
        }
    }

    /// A record for a transaction that deleted the key.
    pub fn delete(tx_id: impl Into<String>, timestamp: HistoryTimestamp) -> Self {
        Self {
            tx_id: tx_id.into(),
            value: Vec::new(),
            timestamp,
            is_delete: true,
        }
    }
}
