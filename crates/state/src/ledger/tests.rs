// Path: crates/state/src/ledger/tests.rs

use super::*;
use asset_registry_api::history::HistoryGuard;
use asset_registry_api::host::LedgerHost;

/// Writes `args[0] = args[1]` and fails when asked to.
struct Setter;

impl LedgerService for Setter {
    fn init(&self, _host: &mut dyn LedgerHost) -> InvocationResult {
        InvocationResult::success(Vec::new())
    }

    fn invoke(&self, host: &mut dyn LedgerHost, invocation: &Invocation) -> InvocationResult {
        let [key, value] = invocation.args.as_slice() else {
            return InvocationResult::error("bad args");
        };
        if let Err(e) = host.insert(key.as_bytes(), value.as_bytes()) {
            return InvocationResult::error(e.to_string());
        }
        if invocation.function == "fail" {
            return InvocationResult::error("asked to fail");
        }
        InvocationResult::success(Vec::new())
    }
}

fn origin() -> HistoryTimestamp {
    HistoryTimestamp::new(1_700_000_000, 0)
}

#[test]
fn writes_are_invisible_until_commit() {
    let mut ledger = MemoryLedger::starting_at(origin());
    ledger.begin("t1", origin()).unwrap();
    ledger.insert(b"k", b"\"v\"").unwrap();
    assert_eq!(ledger.get(b"k").unwrap(), None);

    assert_eq!(ledger.commit().unwrap(), 1);
    assert_eq!(ledger.get(b"k").unwrap(), Some(b"\"v\"".to_vec()));
    assert_eq!(ledger.history_len(b"k"), 1);
}

#[test]
fn rollback_discards_writes_and_history() {
    let mut ledger = MemoryLedger::starting_at(origin());
    ledger.begin("t1", origin()).unwrap();
    ledger.insert(b"k", b"\"v\"").unwrap();
    ledger.rollback();
    assert!(!ledger.in_transaction());
    assert_eq!(ledger.get(b"k").unwrap(), None);
    assert_eq!(ledger.history_len(b"k"), 0);
}

#[test]
fn one_record_per_touched_key_last_write_wins() {
    let mut ledger = MemoryLedger::starting_at(origin());
    ledger.begin("t1", origin()).unwrap();
    ledger.insert(b"k", b"\"a\"").unwrap();
    ledger.insert(b"k", b"\"b\"").unwrap();
    ledger.commit().unwrap();

    ledger.begin("t2", HistoryTimestamp::new(1_700_000_001, 0)).unwrap();
    ledger.delete(b"k").unwrap();
    ledger.commit().unwrap();

    let records: Vec<MutationRecord> = HistoryGuard::open(&ledger, b"k")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        records,
        vec![
            MutationRecord::write("t1", b"\"b\"".to_vec(), origin()),
            MutationRecord::delete("t2", HistoryTimestamp::new(1_700_000_001, 0)),
        ]
    );
    assert_eq!(ledger.get(b"k").unwrap(), None);
    assert_eq!(ledger.open_cursors(), 0);
}

#[test]
fn transaction_lifecycle_errors() {
    let mut ledger = MemoryLedger::starting_at(origin());
    assert_eq!(ledger.commit(), Err(LedgerError::NoTransaction));
    assert!(matches!(
        ledger.insert(b"k", b"v"),
        Err(StateError::WriteError(_))
    ));

    ledger.begin("t1", origin()).unwrap();
    assert_eq!(
        ledger.begin("t2", origin()),
        Err(LedgerError::TransactionInProgress("t1".to_string()))
    );
}

#[test]
fn empty_keys_are_rejected() {
    let mut ledger = MemoryLedger::starting_at(origin());
    ledger.begin("t1", origin()).unwrap();
    assert!(ledger.get(b"").is_err());
    assert!(ledger.insert(b"", b"v").is_err());
    assert!(ledger.delete(b"").is_err());
    assert!(ledger.history_for_key(b"").is_err());
}

#[test]
fn execute_commits_only_successful_invocations() {
    let mut ledger = MemoryLedger::starting_at(origin());
    let ok = ledger
        .execute(&Setter, &Invocation::new("set", ["k", "1"]))
        .unwrap();
    assert!(ok.is_success());
    let failed = ledger
        .execute(&Setter, &Invocation::new("fail", ["k", "2"]))
        .unwrap();
    assert!(!failed.is_success());

    assert!(!ledger.in_transaction());
    assert_eq!(ledger.get(b"k").unwrap(), Some(b"1".to_vec()));
    assert_eq!(ledger.history_len(b"k"), 1);
}

#[test]
fn execute_assigns_sequential_ids_and_monotonic_times() {
    let mut ledger = MemoryLedger::starting_at(origin());
    ledger.instantiate(&Setter).unwrap();
    ledger
        .execute(&Setter, &Invocation::new("set", ["k", "1"]))
        .unwrap();
    ledger
        .execute(&Setter, &Invocation::new("set", ["k", "2"]))
        .unwrap();

    let records: Vec<MutationRecord> = HistoryGuard::open(&ledger, b"k")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records[0].tx_id, "tx-00000002");
    assert_eq!(records[1].tx_id, "tx-00000003");
    assert_eq!(records[0].timestamp, HistoryTimestamp::new(1_700_000_000, 1_000_000));
    assert_eq!(records[1].timestamp, HistoryTimestamp::new(1_700_000_000, 2_000_000));
}

#[test]
fn injected_faults_surface_as_state_errors() {
    let mut ledger = MemoryLedger::starting_at(origin());
    ledger.inject(FaultPlan::failing_reads("disk gone"));
    assert_eq!(
        ledger.get(b"k"),
        Err(StateError::Backend("disk gone".to_string()))
    );

    ledger.inject(FaultPlan::failing_writes("read only"));
    ledger.begin("t1", origin()).unwrap();
    assert_eq!(
        ledger.insert(b"k", b"v"),
        Err(StateError::WriteError("read only".to_string()))
    );
    ledger.rollback();

    ledger.inject(FaultPlan {
        fail_creator: Some("no proposal".to_string()),
        ..FaultPlan::default()
    });
    assert!(matches!(ledger.creator(), Err(StateError::Unavailable(_))));

    ledger.clear_faults();
    ledger.set_creator(b"id".to_vec());
    assert_eq!(ledger.creator().unwrap(), b"id".to_vec());
}

#[test]
fn dropping_an_unclosed_cursor_is_visible() {
    let ledger = MemoryLedger::starting_at(origin());
    let cursor = ledger.history_for_key(b"k").unwrap();
    assert_eq!(ledger.open_cursors(), 1);
    drop(cursor);
    assert_eq!(ledger.open_cursors(), 1);

    let guard = HistoryGuard::open(&ledger, b"k").unwrap();
    assert_eq!(ledger.open_cursors(), 2);
    drop(guard);
    assert_eq!(ledger.open_cursors(), 1);
}

#[test]
fn clock_origin_beyond_nanosecond_range_still_advances() {
    let far = HistoryTimestamp::new(10_000_000_000, 0);
    let mut ledger = MemoryLedger::starting_at(far);
    let result = ledger
        .execute(&Setter, &Invocation::new("set", ["k", "1"]))
        .unwrap();
    assert!(result.is_success());
    ledger
        .execute(&Setter, &Invocation::new("set", ["k", "2"]))
        .unwrap();

    let records: Vec<MutationRecord> = HistoryGuard::open(&ledger, b"k")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records[0].timestamp, far);
    assert_eq!(
        records[1].timestamp,
        HistoryTimestamp::new(10_000_000_000, 1_000_000)
    );
}

#[test]
fn exhausted_clock_is_an_error_not_a_panic() {
    let last = HistoryTimestamp::new(i64::MAX, 999_999_999);
    let mut ledger = MemoryLedger::starting_at(last);
    assert_eq!(
        ledger.execute(&Setter, &Invocation::new("set", ["k", "1"])),
        Err(LedgerError::ClockOverflow(last))
    );
    assert!(!ledger.in_transaction());
    assert_eq!(ledger.history_len(b"k"), 0);
}
