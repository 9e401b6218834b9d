//! Bearer credential for the upstream API.
//!
//! Loaded once at startup from a token file. Surrounding whitespace (including
//! the trailing newline most editors leave behind) is never part of the token.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{GatewayError, Result};

/// Opaque, non-empty bearer token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Read and validate the token file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            GatewayError::Config(format!("could not read token from {}: {e}", path.display()))
        })?;
        let cred = Self::parse(&raw).map_err(|e| match e {
            GatewayError::Config(m) => GatewayError::Config(format!("token file {}: {m}", path.display())),
            other => other,
        })?;

        tracing::info!(path = %path.display(), token = %cred.redacted(), "credential loaded");
        Ok(cred)
    }

    /// Trim and validate a raw token string.
    ///
    /// The token becomes an HTTP header value: control characters (embedded
    /// newlines, tabs, DEL) are rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(GatewayError::Config("credential must not be empty".into()));
        }
        if token.chars().any(char::is_control) {
            return Err(GatewayError::Config(
                "credential must not contain control characters".into(),
            ));
        }
        Ok(Self(token.to_string()))
    }

    /// The raw token, for building the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short preview safe for logs: the last four characters of long tokens.
    pub fn redacted(&self) -> String {
        let n = self.0.chars().count();
        if n <= 8 {
            return "****".to_string();
        }
        let tail: String = self.0.chars().skip(n - 4).collect();
        format!("****{tail}")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.redacted()).finish()
    }
}
