//! # QRZ.com Session Lookup Client
//!
//! A small, synchronous Rust client for QRZ.com XML callsign lookups.
//!
//! The library has two pieces: a minimal XML node extractor ([`node`]) that
//! pulls named tags out of a text blob, and a session-based lookup client
//! ([`SessionClient`]) that authenticates against the QRZ service, caches the
//! session key, and transparently re-authenticates exactly once when the
//! service rejects the key.
//!
//! ## Features
//!
//! - **Session management**: session keys are cached and refreshed
//!   automatically when the service reports them invalid
//! - **Pluggable transport**: network I/O goes through the [`Transport`]
//!   trait; a blocking `reqwest` implementation is provided and stubs drop in
//!   for testing
//! - **Faithful parsing**: the extractor reproduces the classic regex-based
//!   tag search used by amateur radio tooling, documented limitations and all
//! - **No surprises**: every failure is reported as a `bool` plus a
//!   retrievable error string; the client stays usable after any failure
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qrz_lookup::SessionClient;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = SessionClient::new()?;
//!     client.set_credentials("your_username", "your_password");
//!
//!     if client.lookup("AA7BQ") {
//!         for (name, value) in client.record().iter() {
//!             println!("{}: {}", name, value);
//!         }
//!     } else {
//!         eprintln!("lookup failed: {}", client.error());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Authentication
//!
//! You need a valid QRZ.com username and password. While any QRZ user can
//! authenticate, complete callsign records require an active QRZ XML logbook
//! data subscription.

pub mod client;
pub mod credentials;
pub mod error;
pub mod node;
pub mod transport;
pub mod types;

pub use client::{QrzClientConfig, SessionClient};
pub use credentials::StoredCredentials;
pub use error::{QrzLookupError, Result};
pub use node::XmlNode;
pub use transport::{HttpResponse, HttpTransport, Transport, TransportError};
pub use types::{CallsignRecord, Credentials, Session};

/// The default base URL for QRZ's XML API
pub const DEFAULT_BASE_URL: &str = "https://xmldata.qrz.com/xml/current/";

/// Default user agent string for requests
pub const DEFAULT_USER_AGENT: &str = concat!("qrz-lookup-rs/", env!("CARGO_PKG_VERSION"));

/// Error text the service returns for a rejected session key.
///
/// The retry logic compares against this exact string; it is the only error
/// that triggers an automatic re-authentication.
pub const INVALID_SESSION_KEY: &str = "Invalid session key";

/// Error text the service returns for bad credentials.
pub const INVALID_CREDENTIALS: &str = "Username/password incorrect";

/// `SubExp` value reported for accounts without an XML data subscription.
pub const NON_SUBSCRIBER: &str = "non-subscriber";

#[allow(clippy::const_is_empty)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!(!DEFAULT_BASE_URL.is_empty());
        assert!(DEFAULT_USER_AGENT.contains("qrz-lookup-rs"));
        assert_eq!(INVALID_SESSION_KEY, "Invalid session key");
    }
}
