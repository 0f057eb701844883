// Path: crates/test_utils/src/fixtures.rs
//! Generated certificates, identity envelopes, and ready-to-use ledgers.

use asset_registry_state::MemoryLedger;
use asset_registry_types::app::{HistoryTimestamp, SerializedIdentity};
use prost::Message;
use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair, SerialNumber};

/// The clock origin of [`ledger_with_identity`]: 2023-11-14 22:13:20 UTC.
pub const LEDGER_ORIGIN: HistoryTimestamp = HistoryTimestamp {
    seconds: 1_700_000_000,
    nanos: 0,
};

/// A self-signed PEM certificate whose subject CN is `common_name` and whose serial
/// number has the magnitude bytes `serial`.
pub fn certificate_pem(common_name: &str, serial: &[u8]) -> Result<String, rcgen::Error> {
    let mut params = CertificateParams::new(Vec::<String>::new())?;
    let mut subject = DistinguishedName::new();
    subject.push(DnType::CommonName, common_name);
    params.distinguished_name = subject;
    params.serial_number = Some(SerialNumber::from_slice(serial));

    let key_pair = KeyPair::generate()?;
    Ok(params.self_signed(&key_pair)?.pem())
}

/// Encodes an identity envelope the way the host presents the transaction creator.
pub fn identity_envelope(msp_id: &str, id_bytes: &[u8]) -> Vec<u8> {
    SerializedIdentity {
        mspid: msp_id.to_string(),
        id_bytes: id_bytes.to_vec(),
    }
    .encode_to_vec()
}

/// A deterministic ledger whose caller is `common_name` of `msp_id`.
pub fn ledger_with_identity(
    msp_id: &str,
    common_name: &str,
    serial: &[u8],
) -> Result<MemoryLedger, rcgen::Error> {
    let pem = certificate_pem(common_name, serial)?;
    let mut ledger = MemoryLedger::starting_at(LEDGER_ORIGIN);
    ledger.set_creator(identity_envelope(msp_id, pem.as_bytes()));
    Ok(ledger)
}
