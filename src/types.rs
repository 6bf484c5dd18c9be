//! Value types held by the session client.

use std::collections::BTreeMap;

use crate::NON_SUBSCRIBER;

/// QRZ account credentials. Set once per client lifetime and immutable until
/// explicitly reset.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// QRZ database username.
    pub username: String,
    /// QRZ database password.
    pub password: String,
    /// Optional agent string, typically the client program name and version.
    /// QRZ uses it for debugging purposes.
    pub agent: String,
}

impl Credentials {
    /// True when both username and password are present.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

/// Session state reported by the service.
///
/// An empty `key` means "no active session". A non-empty key implies the call
/// that produced it reported no error.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Opaque session key required for lookup calls. Invalidated server-side
    /// at unspecified intervals.
    pub key: String,
    /// Informational message from the last response, if any.
    pub message: String,
    /// Subscription expiration info (`SubExp`), or `"non-subscriber"`.
    pub subscription: String,
}

impl Session {
    /// True when a session key is cached.
    pub fn is_active(&self) -> bool {
        !self.key.is_empty()
    }

    /// True when the service reported an active XML data subscription.
    pub fn is_subscriber(&self) -> bool {
        !self.subscription.is_empty() && self.subscription != NON_SUBSCRIBER
    }
}

/// A callsign record: field name to field value, as returned by the service.
///
/// Rebuilt completely on every successful lookup, never merged with a prior
/// record. Field names are whatever tags the service chose to include.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallsignRecord {
    fields: BTreeMap<String, String>,
}

impl CallsignRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: String, value: String) {
        self.fields.insert(name, value);
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// True when the record holds the named field.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no lookup has populated the record.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
