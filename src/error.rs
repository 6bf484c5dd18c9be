//! Error types for the QRZ lookup library.
//!
//! Failures never cross the [`SessionClient`](crate::client::SessionClient)
//! boundary as panics: every operation reports `bool` and records the
//! `Display` form of the error it hit. The `Display` of a [`Service`]
//! variant is the server's `Error` node text verbatim, so the invalid-session
//! sentinel can be compared exactly and other service errors reach the caller
//! unaltered.
//!
//! [`Service`]: QrzLookupError::Service

use thiserror::Error;

use crate::transport::TransportError;
use crate::INVALID_SESSION_KEY;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, QrzLookupError>;

/// Error taxonomy for session and lookup operations.
#[derive(Error, Debug)]
pub enum QrzLookupError {
    /// Connection, timeout, or HTTP-status failure. Terminal for the current
    /// attempt; never retried automatically.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// An expected XML node was absent from the response.
    #[error("QRZ {0} node not found")]
    MissingNode(&'static str),

    /// The server reported an `Error` node; the text is carried verbatim.
    #[error("{0}")]
    Service(String),

    /// Username or password missing before `start_session`. No network call
    /// is attempted.
    #[error("QRZ {0} not set")]
    CredentialsMissing(&'static str),

    /// Authentication completed without producing a session key.
    #[error("no session key available")]
    NoSession,

    /// Credentials file could not be read.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl QrzLookupError {
    /// Create a service error from the server's `Error` node text.
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }

    /// True when the server explicitly rejected the session key.
    ///
    /// This is the only error that drives the automatic one-shot
    /// re-authentication; the comparison is against the exact sentinel text.
    pub fn is_invalid_session(&self) -> bool {
        matches!(self, Self::Service(msg) if msg == INVALID_SESSION_KEY)
    }

    /// True when the server rejected the username/password pair.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Service(msg) if msg == crate::INVALID_CREDENTIALS)
    }
}
