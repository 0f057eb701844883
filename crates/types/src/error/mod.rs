// Path: crates/types/src/error/mod.rs
//! Core error types for the asset registry.

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the host-owned state store and history index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// An error occurred in the state backend.
    #[error("State backend error: {0}")]
    Backend(String),
    /// An error occurred while writing to the state.
    #[error("State write error: {0}")]
    WriteError(String),
    /// The history cursor failed while producing the next record.
    #[error("History iterator error: {0}")]
    Iterator(String),
    /// The host could not supply the requested context (e.g., caller identity).
    #[error("Context unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by the registry's invocation handlers.
///
/// The `Display` text of each variant is the failure message returned to the host,
/// so the wording is part of the external interface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The handler was called with the wrong number of arguments.
    #[error("Incorrect number of arguments. Expecting {expected}{}", arity_hint(.hint))]
    Arity {
        /// The number of arguments the handler requires.
        expected: usize,
        /// An optional usage hint appended to the message.
        hint: Option<&'static str>,
    },
    /// The key is absent, or its stored value has zero length.
    #[error("ERR the VAL is empty for KEY={0}")]
    NotFound(String),
    /// A point operation against the state store failed.
    #[error("ERR in {op}. err.Error()={source}")]
    Store {
        /// The host operation that failed (`GetState`, `PutState`, `DelState`).
        op: &'static str,
        /// The error reported by the store.
        #[source]
        source: StateError,
    },
    /// The history index failed; its message is passed through unchanged.
    #[error(transparent)]
    History(StateError),
    /// A history record carried a timestamp outside the representable range.
    #[error("Invalid history timestamp: seconds={seconds} nanos={nanos}")]
    Timestamp {
        /// Seconds since the Unix epoch.
        seconds: i64,
        /// Sub-second component in nanoseconds.
        nanos: i32,
    },
    /// Encoding the asset value as JSON failed.
    #[error("ERR encoding VAL >{value}<. err.Error()={reason}")]
    Encoding {
        /// The raw value that could not be encoded.
        value: String,
        /// The encoder's error message.
        reason: String,
    },
    /// No handler is registered under the requested function name.
    #[error("Invalid Smart Contract function name.")]
    UnknownFunction(String),
}

fn arity_hint(hint: &Option<&'static str>) -> String {
    match hint {
        Some(h) => format!(". {h}"),
        None => String::new(),
    }
}

/// Errors from decoding the caller's identity envelope and certificate.
///
/// These are diagnostic only: they are logged and never change an invocation's outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The host could not provide the caller identity bytes.
    #[error("Could not read the caller identity: {0}")]
    Source(StateError),
    /// The bytes are not a valid serialized identity envelope.
    #[error("Could not deserialize a SerializedIdentity: {0}")]
    Envelope(String),
    /// The envelope's identity bytes hold no PEM certificate block.
    #[error("Failed to decode PEM structure: {0}")]
    Pem(String),
    /// The PEM block does not contain a valid X.509 certificate.
    #[error("Unable to parse certificate: {0}")]
    Certificate(String),
}

/// Errors from loading configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration text is not valid TOML for the expected structure.
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A configured value is semantically invalid.
    #[error("Configuration error: {0}")]
    Invalid(String),
}
