// Path: crates/types/src/app/identity.rs

//! The caller identity envelope supplied by the host and the summary extracted from it.
//!
//! The envelope is a protobuf message; its field tags are fixed by the host's
//! membership service and must not change.

/// The serialized identity of a transaction's creator.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SerializedIdentity {
    /// The identifier of the membership service provider that issued the certificate.
    #[prost(string, tag = "1")]
    pub mspid: ::prost::alloc::string::String,
    /// The PEM-encoded X.509 certificate of the creator.
    #[prost(bytes = "vec", tag = "2")]
    pub id_bytes: ::prost::alloc::vec::Vec<u8>,
}

/// The audit-relevant fields extracted from a caller's identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallerIdentity {
    /// The membership service provider identifier.
    pub msp_id: String,
    /// The certificate subject's common name, empty when the subject has none.
    pub common_name: String,
    /// The certificate serial number as colon-separated lowercase hex octets.
    pub serial: String,
}
