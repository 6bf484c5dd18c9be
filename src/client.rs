//! Session-based QRZ.com lookup client.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::form_urlencoded;

use crate::credentials;
use crate::error::{QrzLookupError, Result};
use crate::node;
use crate::transport::{HttpTransport, Transport, TransportError};
use crate::types::{CallsignRecord, Credentials, Session};
use crate::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, INVALID_SESSION_KEY};

/// Configuration for the lookup client
#[derive(Debug, Clone)]
pub struct QrzClientConfig {
    /// Base URL for the QRZ XML API
    pub base_url: String,
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for QrzClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Session-oriented QRZ.com XML lookup client.
///
/// Owns the credentials, the cached session key, and the last reported
/// error/message. All network I/O goes through the injected [`Transport`].
/// Operations are synchronous and blocking; one client instance serves one
/// logical caller at a time.
///
/// Typical usage:
///
/// 1. [`set_credentials`](Self::set_credentials) (or
///    [`load_credentials`](Self::load_credentials))
/// 2. [`lookup`](Self::lookup) a callsign; a session is started on demand
/// 3. read the result from [`record`](Self::record), or the failure from
///    [`error`](Self::error)
///
/// When the service rejects the cached session key, `lookup` re-authenticates
/// once and retries once. Because of this, a single `lookup` call issues at
/// most three sequential requests against an established session.
pub struct SessionClient<T: Transport> {
    transport: T,
    config: QrzClientConfig,
    credentials: Credentials,
    session: Session,
    record: CallsignRecord,
    last_error: String,
    last_http_status: Option<u16>,
    last_http_info: String,
}

impl SessionClient<HttpTransport> {
    /// Create a client with the default configuration and HTTP transport.
    pub fn new() -> std::result::Result<Self, TransportError> {
        Self::with_config(QrzClientConfig::default())
    }

    /// Create a client with a custom configuration and HTTP transport.
    pub fn with_config(config: QrzClientConfig) -> std::result::Result<Self, TransportError> {
        let transport = HttpTransport::new(
            &config.user_agent,
            Duration::from_secs(config.timeout_seconds),
        )?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> SessionClient<T> {
    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: T, config: QrzClientConfig) -> Self {
        Self {
            transport,
            config,
            credentials: Credentials::default(),
            session: Session::default(),
            record: CallsignRecord::new(),
            last_error: String::new(),
            last_http_status: None,
            last_http_info: String::new(),
        }
    }

    /// Set the username and password for the query session.
    ///
    /// Pure state update, no I/O; an existing session is left alone.
    pub fn set_credentials(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.credentials.username = username.into();
        self.credentials.password = password.into();
    }

    /// Set the optional agent string sent with authentication requests.
    pub fn set_agent(&mut self, agent: impl Into<String>) {
        self.credentials.agent = agent.into();
    }

    /// Resume a previously issued session key.
    pub fn set_session_key(&mut self, key: impl Into<String>) {
        self.session.key = key.into();
    }

    /// Load username, password, and an optional cached session key from a
    /// credentials file (see the [`credentials`](crate::credentials) module
    /// for the expected format).
    pub fn load_credentials<P: AsRef<Path>>(&mut self, path: P) -> bool {
        match credentials::read_file(path) {
            Ok(stored) => {
                self.credentials.username = stored.username;
                self.credentials.password = stored.password;
                self.session.key = stored.session_key;
                self.last_error.clear();
                true
            }
            Err(e) => {
                self.last_error = e.to_string();
                false
            }
        }
    }

    /// Current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The record from the last successful lookup.
    pub fn record(&self) -> &CallsignRecord {
        &self.record
    }

    /// A single field from the last successful lookup.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.record.get(name)
    }

    /// The error string from the last failed operation, empty after success.
    pub fn error(&self) -> &str {
        &self.last_error
    }

    /// The informational message from the last service response, if any.
    pub fn message(&self) -> &str {
        &self.session.message
    }

    /// HTTP status of the last completed request, if one completed.
    pub fn last_http_status(&self) -> Option<u16> {
        self.last_http_status
    }

    /// Transport-level detail for the last failed request, empty otherwise.
    pub fn last_http_info(&self) -> &str {
        &self.last_http_info
    }

    /// The injected transport, mostly useful for test inspection.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Start a QRZ query session.
    ///
    /// Requires a username and password; fails without a network call
    /// otherwise. On success the session key, message, and subscription info
    /// are updated and the error string is cleared. On failure the session
    /// key is left as it was.
    pub fn start_session(&mut self) -> bool {
        match self.try_start_session() {
            Ok(()) => {
                self.last_error.clear();
                true
            }
            Err(e) => {
                self.last_error = e.to_string();
                false
            }
        }
    }

    /// Look up a callsign, starting or refreshing the session as needed.
    ///
    /// If no session is active, one is started first. If the service rejects
    /// the session key with the exact `"Invalid session key"` error, the key
    /// is dropped, one re-authentication is attempted, and the lookup is
    /// retried exactly once. Any other failure is terminal for this call.
    ///
    /// On success the callsign record is rebuilt from the response; retrieve
    /// it with [`record`](Self::record). On failure the previous record is
    /// left untouched and [`error`](Self::error) holds the reason.
    pub fn lookup(&mut self, callsign: &str) -> bool {
        debug!("Looking up callsign: {}", callsign);
        match self.try_lookup(callsign) {
            Ok(()) => {
                self.last_error.clear();
                info!("Successfully looked up callsign: {}", callsign);
                true
            }
            Err(e) => {
                self.last_error = e.to_string();
                false
            }
        }
    }

    fn try_lookup(&mut self, callsign: &str) -> Result<()> {
        if !self.session.is_active() {
            self.try_start_session()?;
        }

        // Bounded retry: exactly one re-authentication cycle, never a loop
        // beyond that.
        let mut reauthenticated = false;
        loop {
            match self.attempt_lookup(callsign) {
                Ok(()) => return Ok(()),
                Err(e) if e.is_invalid_session() && !reauthenticated => {
                    warn!("Session key rejected, re-authenticating and retrying");
                    reauthenticated = true;
                    // The server explicitly reported the key invalid.
                    self.session.key.clear();
                    self.try_start_session()?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn try_start_session(&mut self) -> Result<()> {
        if self.credentials.username.is_empty() {
            return Err(QrzLookupError::CredentialsMissing("username"));
        }
        if self.credentials.password.is_empty() {
            return Err(QrzLookupError::CredentialsMissing("password"));
        }

        let username = self.credentials.username.clone();
        let password = self.credentials.password.clone();
        let agent = self.credentials.agent.clone();

        let mut params = vec![
            ("username", username.as_str()),
            ("password", password.as_str()),
        ];
        if !agent.is_empty() {
            params.push(("agent", agent.as_str()));
        }

        debug!("Starting QRZ session");
        let body = self.get(&params)?;
        self.parse_session(&body)?;

        if !self.session.is_active() {
            return Err(QrzLookupError::NoSession);
        }

        info!("Successfully authenticated with QRZ.com");
        Ok(())
    }

    /// One keyed lookup attempt. Session-level errors in the response are
    /// reported before the callsign node is touched, so a failed attempt
    /// never disturbs the previous record.
    fn attempt_lookup(&mut self, callsign: &str) -> Result<()> {
        if !self.session.is_active() {
            return Err(QrzLookupError::service(INVALID_SESSION_KEY));
        }

        let key = self.session.key.clone();
        let body = self.get(&[("s", key.as_str()), ("callsign", callsign)])?;

        self.parse_session(&body)?;
        self.parse_callsign(&body)?;
        Ok(())
    }

    /// Issue a GET request for the given query parameters and return the
    /// body of a 200 response. Non-200 statuses are transport failures.
    fn get(&mut self, params: &[(&str, &str)]) -> Result<String> {
        let url = self.build_url(params);
        self.last_http_status = None;
        self.last_http_info.clear();

        match self.transport.request(&url) {
            Ok(response) => {
                self.last_http_status = Some(response.status);
                if !response.is_ok() {
                    let err = TransportError::Status(response.status);
                    self.last_http_info = err.to_string();
                    return Err(err.into());
                }
                Ok(response.body)
            }
            Err(e) => {
                self.last_http_info = e.to_string();
                Err(e.into())
            }
        }
    }

    fn build_url(&self, params: &[(&str, &str)]) -> String {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        format!("{}?{}", self.config.base_url, query)
    }

    /// Parse `QRZDatabase -> Session` out of a response body and fold it into
    /// the client state. The session key is only updated when the response
    /// carries no error.
    fn parse_session(&mut self, body: &str) -> Result<()> {
        self.session.message.clear();
        self.session.subscription.clear();

        let root = node::find("QRZDatabase", body)
            .ok_or(QrzLookupError::MissingNode("QRZDatabase"))?;
        let session =
            node::find("Session", &root.text).ok_or(QrzLookupError::MissingNode("Session"))?;

        if let Some(message) = node::find("Message", &session.text) {
            self.session.message = message.text;
        }
        if let Some(sub) = node::find("SubExp", &session.text) {
            self.session.subscription = sub.text;
        }
        if !self.session.message.is_empty() {
            debug!("QRZ message: {}", self.session.message);
        }

        if let Some(error) = node::find("Error", &session.text) {
            if !error.text.is_empty() {
                return Err(QrzLookupError::service(error.text));
            }
        }

        if let Some(key) = node::find("Key", &session.text) {
            self.session.key = key.text;
        }
        Ok(())
    }

    /// Parse `QRZDatabase -> Callsign` out of a response body, rebuilding the
    /// record from scratch. Individual fields that fail to extract are
    /// skipped, not fatal.
    fn parse_callsign(&mut self, body: &str) -> Result<()> {
        let root = node::find("QRZDatabase", body)
            .ok_or(QrzLookupError::MissingNode("QRZDatabase"))?;
        let callsign =
            node::find("Callsign", &root.text).ok_or(QrzLookupError::MissingNode("Callsign"))?;

        let mut record = CallsignRecord::new();
        for name in node::element_names(&callsign.text) {
            match node::find(&name, &callsign.text) {
                Some(n) => record.insert(name, n.text),
                None => debug!("Error parsing callsign field: {}", name),
            }
        }
        self.record = record;
        Ok(())
    }
}
