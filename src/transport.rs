//! The transport seam between the session client and the network.
//!
//! [`SessionClient`](crate::client::SessionClient) never talks to the network
//! directly; it hands a fully-built URL to a [`Transport`] and gets back a
//! status code and body. The [`HttpTransport`] here is the production
//! implementation on top of blocking `reqwest`; tests substitute scripted
//! stubs.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// Errors raised at the transport boundary.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection-level failure: DNS, refused connection, timeout, TLS.
    #[error("connection error: {0}")]
    Connection(String),

    /// The request completed but the server answered with a non-200 status.
    #[error("HTTP request failed with status {0}")]
    Status(u16),
}

/// A completed HTTP exchange: status code plus response body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as UTF-8.
    pub body: String,
}

impl HttpResponse {
    /// True when the server answered 200.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Blocking GET collaborator.
///
/// A transport reports `Err` only for local failures (no connection, timeout).
/// Any response the server actually produced is returned as
/// [`HttpResponse`], non-200 statuses included; the caller decides what a
/// usable status is.
pub trait Transport {
    /// Issue a GET request for `url` and block until a response or failure.
    fn request(&mut self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by a blocking `reqwest` client.
///
/// The timeout is fixed at construction; expiry surfaces as an ordinary
/// [`TransportError::Connection`], not a distinct cancellation path.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a transport with the given user agent and per-request timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn request(&mut self, url: &str) -> Result<HttpResponse, TransportError> {
        debug!("Making request to: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
