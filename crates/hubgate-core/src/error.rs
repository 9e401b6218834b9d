//! Shared error type across hubgate crates.

use thiserror::Error;

/// Stable error codes used in log fields and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Startup configuration is missing or invalid.
    Config,
    /// The upstream API call failed.
    Upstream,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::Config => "CONFIG",
            ClientCode::Upstream => "UPSTREAM",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failure of a single upstream call. Recoverable, scoped to one request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    /// Connection, TLS, or body read failure.
    #[error("request failed: {0}")]
    Transport(String),
    /// Upstream answered with a non-2xx status.
    #[error("{status} - {body}")]
    Status { status: u16, body: String },
    /// Body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Fatal, startup only.
    #[error("config: {0}")]
    Config(String),
    #[error("upstream: {0}")]
    Upstream(#[from] UpstreamError),
    #[error("internal: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn client_code(&self) -> ClientCode {
        match self {
            GatewayError::Config(_) => ClientCode::Config,
            GatewayError::Upstream(_) => ClientCode::Upstream,
            GatewayError::Internal(_) => ClientCode::Internal,
        }
    }
}
