// Path: crates/services/src/registry/history.rs
//! Reconstruction of a key's mutation history as a JSON array.
//!
//! The output shape is consumed by existing clients and is fixed:
//!
//! ```text
//! [{"TxId":"<id>", "Value":<raw bytes or null>, "Timestamp":"<text>", "IsDelete":"<true|false>"},...]
//! ```
//!
//! `Value` is written verbatim because stored values are already JSON text, and
//! `IsDelete` is a quoted string rather than a JSON boolean.

use asset_registry_api::history::HistoryGuard;
use asset_registry_api::host::LedgerHost;
use asset_registry_api::services::InvocationHandler;
use asset_registry_telemetry::sinks::RegistryMetricsSink;
use asset_registry_types::app::{HistoryTimestamp, MutationRecord};
use asset_registry_types::config::TimestampZone;
use asset_registry_types::error::{RegistryError, StateError};
use chrono::{DateTime, FixedOffset, Local, Timelike, Utc};
use std::sync::Arc;

pub const LIST_HISTORY: &str = "listHistory";

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// `listHistory(key, ...)`: the full mutation history of `key`, oldest first.
///
/// Arguments after the key are ignored.
#[derive(Debug, Clone)]
pub struct ListHistory {
    zone: TimestampZone,
    metrics: Arc<dyn RegistryMetricsSink>,
}

impl ListHistory {
    pub fn new(zone: TimestampZone, metrics: Arc<dyn RegistryMetricsSink>) -> Self {
        Self { zone, metrics }
    }
}

impl InvocationHandler for ListHistory {
    fn name(&self) -> &'static str {
        LIST_HISTORY
    }

    fn handle(&self, host: &mut dyn LedgerHost, args: &[String]) -> Result<Vec<u8>, RegistryError> {
        let Some(key) = args.first() else {
            return Err(RegistryError::Arity {
                expected: 1,
                hint: None,
            });
        };
        tracing::info!(target: "history", key = %key, "- start listHistory: {}", key);

        let cursor = HistoryGuard::open(&*host, key.as_bytes()).map_err(RegistryError::History)?;
        let (payload, count) = render_history(cursor, self.zone)?;
        self.metrics.observe_history_records(count);

        tracing::debug!(
            target: "history",
            key = %key,
            records = count,
            "- listHistory returning:\n{}",
            String::from_utf8_lossy(&payload)
        );
        Ok(payload)
    }
}

/// Drains `records` into the JSON array layout and returns it with the record count.
///
/// The first error aborts the whole rendering; no partial output escapes.
pub fn render_history<I>(records: I, zone: TimestampZone) -> Result<(Vec<u8>, u64), RegistryError>
where
    I: IntoIterator<Item = Result<MutationRecord, StateError>>,
{
    let mut buffer = Vec::new();
    buffer.push(b'[');
    let mut count = 0u64;
    for item in records {
        let record = item.map_err(RegistryError::History)?;
        if count > 0 {
            buffer.push(b',');
        }
        write_record(&mut buffer, &record, zone)?;
        count += 1;
    }
    buffer.push(b']');
    Ok((buffer, count))
}

fn write_record(
    buffer: &mut Vec<u8>,
    record: &MutationRecord,
    zone: TimestampZone,
) -> Result<(), RegistryError> {
    buffer.extend_from_slice(b"{\"TxId\":");
    write_json_string(buffer, &record.tx_id)?;

    buffer.extend_from_slice(b", \"Value\":");
    if record.is_delete {
        buffer.extend_from_slice(b"null");
    } else {
        buffer.extend_from_slice(&record.value);
    }

    buffer.extend_from_slice(b", \"Timestamp\":");
    write_json_string(buffer, &format_timestamp(record.timestamp, zone)?)?;

    buffer.extend_from_slice(b", \"IsDelete\":\"");
    let flag: &[u8] = if record.is_delete { b"true" } else { b"false" };
    buffer.extend_from_slice(flag);
    buffer.extend_from_slice(b"\"}");
    Ok(())
}

fn write_json_string(buffer: &mut Vec<u8>, text: &str) -> Result<(), RegistryError> {
    serde_json::to_writer(&mut *buffer, text).map_err(|e| RegistryError::Encoding {
        value: text.to_string(),
        reason: e.to_string(),
    })
}

/// Renders a commit timestamp as `YYYY-MM-DD HH:MM:SS[.fraction] ±hhmm ZONE`.
///
/// The fraction carries the nanoseconds with trailing zeros trimmed and is omitted
/// when zero. ZONE is `UTC` for a zero offset and the numeric offset otherwise.
/// Nanoseconds outside `[0, 1e9)` carry into the seconds.
pub fn format_timestamp(
    timestamp: HistoryTimestamp,
    zone: TimestampZone,
) -> Result<String, RegistryError> {
    let invalid = || RegistryError::Timestamp {
        seconds: timestamp.seconds,
        nanos: timestamp.nanos,
    };
    let total = i128::from(timestamp.seconds) * NANOS_PER_SEC + i128::from(timestamp.nanos);
    let seconds = i64::try_from(total.div_euclid(NANOS_PER_SEC)).map_err(|_| invalid())?;
    let nanos = u32::try_from(total.rem_euclid(NANOS_PER_SEC)).map_err(|_| invalid())?;
    let utc = DateTime::<Utc>::from_timestamp(seconds, nanos).ok_or_else(invalid)?;

    let zoned = match zone {
        TimestampZone::Utc => utc.fixed_offset(),
        TimestampZone::Local => utc.with_timezone(&Local).fixed_offset(),
    };
    Ok(render_zoned(&zoned))
}

fn render_zoned(time: &DateTime<FixedOffset>) -> String {
    let mut out = time.format("%Y-%m-%d %H:%M:%S").to_string();
    let nanos = time.nanosecond();
    if nanos != 0 {
        let digits = format!("{nanos:09}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    let offset = time.format("%z").to_string();
    out.push(' ');
    out.push_str(&offset);
    out.push(' ');
    if time.offset().local_minus_utc() == 0 {
        out.push_str("UTC");
    } else {
        out.push_str(&offset);
    }
    out
}
