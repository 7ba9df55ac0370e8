//! Error types for the client crate.

use std::fmt;

use vmrc_core::RemoteFault;

/// Errors that can occur while driving the managed-object protocol.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Logon was rejected by the server.
    #[error("logon rejected: {0}")]
    Auth(RemoteFault),

    /// Neither the UUID nor the name interpretation of an identifier
    /// matched a registered machine.
    #[error("no machine matches \"{identifier}\"")]
    NotFound { identifier: String },

    /// Any other server-side rejection of a call, including session-state
    /// conflicts.
    #[error(transparent)]
    Fault(#[from] RemoteFault),

    /// A completed asynchronous action reported a non-zero result code.
    /// Distinct from a transport fault: the call sequence itself succeeded.
    #[error("remote operation failed with result code {code}")]
    OperationFailed { code: i32 },

    /// Completion was not observed within the poll budget. The remote
    /// operation may still be running; the protocol offers no abort.
    #[error("operation still running after {polls} bounded waits")]
    Incomplete { polls: u32 },

    /// A call returned a well-formed result of the wrong shape.
    #[error("unexpected response from {method}: {reason}")]
    Protocol { method: &'static str, reason: String },
}

impl ClientError {
    /// Shorthand for a [`ClientError::Protocol`] from any displayable cause.
    pub(crate) fn protocol(method: &'static str, reason: impl fmt::Display) -> Self {
        Self::Protocol { method, reason: reason.to_string() }
    }
}
