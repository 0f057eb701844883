// Path: crates/types/src/app/invocation.rs
//! Invocation requests and the uniform result returned to the host.

use serde::{Deserialize, Serialize};

/// The status code the host expects for a successful invocation.
pub const STATUS_OK: u16 = 200;
/// The status code the host expects for a failed invocation.
pub const STATUS_ERROR: u16 = 500;

/// A single request to run a registry function.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Invocation {
    /// The function name to dispatch on.
    pub function: String,
    /// The positional string arguments.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Invocation {
    /// Creates an invocation from a function name and its arguments.
    pub fn new<I, S>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// The outcome of an invocation: a payload on success or a message on failure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum InvocationResult {
    /// The invocation succeeded; the payload may be empty.
    Success(Vec<u8>),
    /// The invocation failed with a human-readable message.
    Error(String),
}

impl InvocationResult {
    /// A successful result with the given payload.
    pub fn success(payload: impl Into<Vec<u8>>) -> Self {
        Self::Success(payload.into())
    }

    /// A failed result with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// Returns `true` for the success variant.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The host status code for this result.
    pub fn status(&self) -> u16 {
        match self {
            Self::Success(_) => STATUS_OK,
            Self::Error(_) => STATUS_ERROR,
        }
    }

    /// The success payload, if any.
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Error(_) => None,
        }
    }

    /// The failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error(message) => Some(message),
        }
    }
}

impl<E: std::error::Error> From<Result<Vec<u8>, E>> for InvocationResult {
    fn from(result: Result<Vec<u8>, E>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(e) => Self::Error(e.to_string()),
        }
    }
}
