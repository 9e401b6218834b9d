use reqwest::Client;

use hubgate_core::error::{GatewayError, Result, UpstreamError};
use hubgate_core::protocol::upstream::{
    FixedHeaders, ResponseShape, UpstreamBody, UpstreamOutcome, UpstreamRequestSpec,
};
use hubgate_core::Credential;

use crate::config::UpstreamSection;

/// Authenticated client for the upstream REST API.
///
/// Holds no mutable state; concurrent calls share only the connection pool and
/// the read-only header set.
pub struct UpstreamClient {
    http: Client,
    base_url: String,
    repos_path: String,
    identifier_field: String,
    headers: FixedHeaders,
}

impl UpstreamClient {
    pub fn new(cfg: &UpstreamSection, credential: &Credential) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| GatewayError::Config(format!("http client init failed: {e}")))?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            repos_path: cfg.repos_path.clone(),
            identifier_field: cfg.identifier_field.clone(),
            headers: FixedHeaders::new(cfg.user_agent.clone(), cfg.accept.clone(), credential),
        })
    }

    /// Spec for the API root (a single object).
    pub fn root(&self) -> UpstreamRequestSpec {
        self.spec("", ResponseShape::Object)
    }

    /// Spec for the caller's repository listing (an array of objects).
    pub fn repos(&self) -> UpstreamRequestSpec {
        self.spec(&self.repos_path, ResponseShape::Array)
    }

    /// Field naming each element of the repository listing.
    pub fn identifier_field(&self) -> &str {
        &self.identifier_field
    }

    fn spec(&self, path: &str, shape: ResponseShape) -> UpstreamRequestSpec {
        UpstreamRequestSpec {
            uri: format!("{}{}", self.base_url, path),
            headers: self.headers.clone(),
            shape,
        }
    }

    /// Issue exactly one request. Transport errors, non-2xx statuses, and
    /// bodies that do not match `spec.shape` come back as
    /// `UpstreamOutcome::Failure`.
    pub async fn call(&self, spec: &UpstreamRequestSpec) -> UpstreamOutcome {
        tracing::debug!(uri = %spec.uri, shape = ?spec.shape, "upstream call");

        let mut req = self.http.get(&spec.uri);
        for (name, value) in spec.headers.pairs() {
            req = req.header(name, value);
        }

        let resp = match req.send().await {
            Ok(r) => r,
            Err(e) => return failure(&spec.uri, UpstreamError::Transport(e.to_string())),
        };

        let status = resp.status();
        let body = match resp.text().await {
            Ok(b) => b,
            Err(e) => return failure(&spec.uri, UpstreamError::Transport(e.to_string())),
        };

        if !status.is_success() {
            return failure(&spec.uri, UpstreamError::Status { status: status.as_u16(), body });
        }

        let body = UpstreamBody::new(body);
        if let Err(e) = body.check_shape(spec.shape) {
            return failure(&spec.uri, e);
        }
        UpstreamOutcome::Success(body)
    }
}

fn failure(uri: &str, err: UpstreamError) -> UpstreamOutcome {
    tracing::warn!(%uri, error = %err, "upstream call failed");
    UpstreamOutcome::Failure(err)
}
