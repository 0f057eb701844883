// Path: crates/services/src/identity/mod.rs
//! Decoding and logging of the transaction creator's identity.
//!
//! Inspection is diagnostic only: every failure is logged and swallowed so that a
//! malformed identity can never change the outcome of a business operation.

use asset_registry_api::identity::IdentitySource;
use asset_registry_telemetry::sinks::RegistryMetricsSink;
use asset_registry_types::app::{CallerIdentity, SerializedIdentity};
use asset_registry_types::error::IdentityError;
use prost::Message;
use rustls_pemfile::certs;
use x509_parser::parse_x509_certificate;

/// The fields of an X.509 certificate that are recorded for audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateSummary {
    pub common_name: String,
    pub serial: String,
}

/// Decodes the protobuf identity envelope supplied by the host.
pub fn decode_envelope(bytes: &[u8]) -> Result<SerializedIdentity, IdentityError> {
    SerializedIdentity::decode(bytes).map_err(|e| IdentityError::Envelope(e.to_string()))
}

/// Parses the first PEM `CERTIFICATE` block in `pem` and extracts its audit fields.
pub fn parse_certificate(pem: &[u8]) -> Result<CertificateSummary, IdentityError> {
    let mut reader = std::io::BufReader::new(pem);
    let der = certs(&mut reader)
        .next()
        .ok_or_else(|| IdentityError::Pem("no CERTIFICATE block found".to_string()))?
        .map_err(|e| IdentityError::Pem(e.to_string()))?;

    let (_, cert) = parse_x509_certificate(der.as_ref())
        .map_err(|e| IdentityError::Certificate(e.to_string()))?;

    let common_name = cert
        .subject()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .unwrap_or_default()
        .to_string();

    Ok(CertificateSummary {
        common_name,
        serial: format_serial(cert.tbs_certificate.raw_serial()),
    })
}

/// Renders a DER integer's content octets as lowercase colon-separated hex.
///
/// Leading zero octets (the DER sign padding) are dropped so the output reflects the
/// magnitude of the serial; a zero serial renders as an empty string.
pub fn format_serial(raw: &[u8]) -> String {
    raw.iter()
        .skip_while(|b| **b == 0)
        .map(|b| hex::encode([*b]))
        .collect::<Vec<_>>()
        .join(":")
}

/// Reads, decodes, and parses the caller identity, logging each stage.
pub fn inspect_caller<S: IdentitySource + ?Sized>(
    source: &S,
) -> Result<CallerIdentity, IdentityError> {
    let creator = source.creator().map_err(IdentityError::Source)?;
    let envelope = decode_envelope(&creator)?;
    tracing::info!(target: "identity", msp_id = %envelope.mspid, "MSP: {}", envelope.mspid);

    let cert = parse_certificate(&envelope.id_bytes)?;
    tracing::info!(
        target: "identity",
        serial = %cert.serial,
        common_name = %cert.common_name,
        "Cert SerialNumber: {} Subject CommonName: {}",
        cert.serial,
        cert.common_name
    );

    Ok(CallerIdentity {
        msp_id: envelope.mspid,
        common_name: cert.common_name,
        serial: cert.serial,
    })
}

/// Runs [`inspect_caller`] and discards any error after logging it.
pub fn log_caller_identity<S: IdentitySource + ?Sized>(
    source: &S,
    metrics: &dyn RegistryMetricsSink,
) -> Option<CallerIdentity> {
    match inspect_caller(source) {
        Ok(identity) => Some(identity),
        Err(e) => {
            tracing::warn!(target: "identity", error = %e, "caller identity inspection failed");
            metrics.inc_identity_failures();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_registry_telemetry::prometheus::PrometheusSink;
    use asset_registry_test_utils::fixtures::{certificate_pem, identity_envelope};
    use asset_registry_types::error::StateError;

    struct StaticIdentity(Result<Vec<u8>, StateError>);

    impl IdentitySource for StaticIdentity {
        fn creator(&self) -> Result<Vec<u8>, StateError> {
            self.0.clone()
        }
    }

    #[test]
    fn format_serial_strips_sign_padding() {
        assert_eq!(format_serial(&[0x0a, 0x1f, 0x33]), "0a:1f:33");
        assert_eq!(format_serial(&[0x00, 0x9c, 0x01]), "9c:01");
        assert_eq!(format_serial(&[0x01, 0x00]), "01:00");
        assert_eq!(format_serial(&[0x00]), "");
        assert_eq!(format_serial(&[]), "");
    }

    #[test]
    fn parses_common_name_and_serial() {
        let pem = certificate_pem("User1@org1.example.com", &[0x0a, 0x1f, 0x33]).unwrap();
        let summary = parse_certificate(pem.as_bytes()).unwrap();
        assert_eq!(summary.common_name, "User1@org1.example.com");
        assert_eq!(summary.serial, "0a:1f:33");
    }

    #[test]
    fn high_bit_serial_renders_its_magnitude() {
        // DER prefixes a 0x00 octet to keep this serial positive.
        let pem = certificate_pem("Admin@org2.example.com", &[0x9c, 0x42]).unwrap();
        let summary = parse_certificate(pem.as_bytes()).unwrap();
        assert_eq!(summary.serial, "9c:42");
    }

    #[test]
    fn inspect_caller_reads_envelope_end_to_end() {
        let pem = certificate_pem("User1@org1.example.com", &[0x01, 0x02]).unwrap();
        let source = StaticIdentity(Ok(identity_envelope("Org1MSP", pem.as_bytes())));
        let identity = inspect_caller(&source).unwrap();
        assert_eq!(
            identity,
            CallerIdentity {
                msp_id: "Org1MSP".to_string(),
                common_name: "User1@org1.example.com".to_string(),
                serial: "01:02".to_string(),
            }
        );
    }

    #[test]
    fn each_stage_reports_its_own_error() {
        let unavailable = StaticIdentity(Err(StateError::Unavailable("no creator".into())));
        assert!(matches!(
            inspect_caller(&unavailable),
            Err(IdentityError::Source(_))
        ));

        // Field 1 declared as length-delimited but truncated.
        let truncated = StaticIdentity(Ok(vec![0x0a, 0x10, b'O']));
        assert!(matches!(
            inspect_caller(&truncated),
            Err(IdentityError::Envelope(_))
        ));

        let no_pem = StaticIdentity(Ok(identity_envelope("Org1MSP", b"not a certificate")));
        assert!(matches!(inspect_caller(&no_pem), Err(IdentityError::Pem(_))));

        let garbage_der = "-----BEGIN CERTIFICATE-----\nAAECAwQF\n-----END CERTIFICATE-----\n";
        let bad_cert = StaticIdentity(Ok(identity_envelope("Org1MSP", garbage_der.as_bytes())));
        assert!(matches!(
            inspect_caller(&bad_cert),
            Err(IdentityError::Certificate(_))
        ));
    }

    #[test]
    fn log_caller_identity_swallows_failures() {
        let sink = PrometheusSink::new().unwrap();
        let bad = StaticIdentity(Ok(identity_envelope("Org1MSP", b"garbage")));
        assert_eq!(log_caller_identity(&bad, &sink), None);
        assert_eq!(sink.snapshot().identity_failures, 1);
    }
}
