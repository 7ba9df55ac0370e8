use serde::{Deserialize, Serialize};

/// Fault code used when a transport-level failure is surfaced through the
/// gateway contract. Server-assigned codes never use this value.
pub const TRANSPORT_FAULT: i32 = -1;

/// A fault raised by the server (or the transport) in response to a call.
///
/// The gateway contract exposes only the result/fault distinction; this is
/// the fault side, carrying the remote fault code and a human-readable
/// message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("fault {code}: {message}")]
#[non_exhaustive]
pub struct RemoteFault {
    /// Server-assigned fault code.
    pub code: i32,
    /// Human-readable description of the rejection.
    pub message: String,
}

impl RemoteFault {
    /// Creates a fault with the given code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Creates a fault representing a transport-level failure.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(TRANSPORT_FAULT, message)
    }
}
