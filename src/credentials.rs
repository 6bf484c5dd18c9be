//! Credentials file loading.
//!
//! Supports the conventional QRZ credentials file: a plain text file with an
//! embedded block of the form
//!
//! ```text
//! <QRZLookup>
//!   <Session>
//!     <User>myuser</User>
//!     <Pass>mypass</Pass>
//!     <SessKey>optional cached key</SessKey>
//!   </Session>
//! </QRZLookup>
//! ```
//!
//! Lines outside the `<QRZLookup>`/`</QRZLookup>` markers are ignored, so the
//! block can live inside a larger notes or config file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{QrzLookupError, Result};
use crate::node;

/// Credentials loaded from a file: username, password, and an optional cached
/// session key.
#[derive(Debug, Clone, Default)]
pub struct StoredCredentials {
    pub username: String,
    pub password: String,
    /// Previously issued session key, empty when the file has no `SessKey`.
    pub session_key: String,
}

/// Parse a `<QRZLookup>` block that has already been extracted from a file.
///
/// `<User>` and `<Pass>` are expected inside the nested `<Session>` node;
/// `<SessKey>` is optional. Missing `QRZLookup` or `Session` nodes are
/// protocol errors.
pub fn parse(blob: &str) -> Result<StoredCredentials> {
    let root = node::find("QRZLookup", blob).ok_or(QrzLookupError::MissingNode("QRZLookup"))?;
    let session =
        node::find("Session", &root.text).ok_or(QrzLookupError::MissingNode("Session"))?;

    let mut stored = StoredCredentials::default();
    if let Some(user) = node::find("User", &session.text) {
        stored.username = user.text;
    }
    if let Some(pass) = node::find("Pass", &session.text) {
        stored.password = pass.text;
    }
    if let Some(key) = node::find("SessKey", &session.text) {
        stored.session_key = key.text;
    }
    Ok(stored)
}

/// Load credentials from `path`.
///
/// Scans the file line by line, collecting trimmed lines from the one
/// containing `<QRZLookup>` through the one containing `</QRZLookup>`, then
/// parses the collected block.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<StoredCredentials> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut blob = String::new();
    let mut in_block = false;
    for line in reader.lines() {
        let line = line?;
        if in_block {
            blob.push_str(line.trim());
            if line.contains("</QRZLookup>") {
                break;
            }
        } else if line.contains("<QRZLookup>") {
            blob.push_str(line.trim());
            in_block = true;
        }
    }

    parse(&blob)
}
