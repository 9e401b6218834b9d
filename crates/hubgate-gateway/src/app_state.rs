//! Shared application state for the hubgate gateways.
//!
//! Both gateways build their context once at startup and hand it to the
//! router. Nothing here is mutated after construction except the metric
//! atomics.

use std::sync::Arc;

use axum::extract::FromRef;

use hubgate_core::error::Result;
use hubgate_core::Credential;

use crate::config::GatewayConfig;
use crate::obs::MetricsRegistry;
use crate::upstream::UpstreamClient;

/// Context of the repository gateway (`/`, `/myrepos`, `/vars`).
#[derive(Clone)]
pub struct RepoGatewayState {
    metrics: Arc<MetricsRegistry>,
    upstream: Arc<UpstreamClient>,
}

impl RepoGatewayState {
    pub fn new(metrics: Arc<MetricsRegistry>, upstream: UpstreamClient) -> Self {
        Self { metrics, upstream: Arc::new(upstream) }
    }

    /// Load the credential and build the upstream client.
    /// A missing or blank token file is a `GatewayError::Config`.
    pub fn bootstrap(cfg: &GatewayConfig, metrics: Arc<MetricsRegistry>) -> Result<Self> {
        let credential = Credential::load(&cfg.credential.file)?;
        let upstream = UpstreamClient::new(&cfg.upstream, &credential)?;
        Ok(Self::new(metrics, upstream))
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    pub fn upstream(&self) -> &UpstreamClient {
        &self.upstream
    }
}

impl FromRef<RepoGatewayState> for Arc<MetricsRegistry> {
    fn from_ref(state: &RepoGatewayState) -> Self {
        Arc::clone(&state.metrics)
    }
}

/// Context of the greeter gateway (`/`, `/health`, `/vars`).
#[derive(Clone)]
pub struct GreeterState {
    metrics: Arc<MetricsRegistry>,
    identity: Arc<str>,
}

impl GreeterState {
    pub fn new(metrics: Arc<MetricsRegistry>, identity: impl Into<Arc<str>>) -> Self {
        Self { metrics, identity: identity.into() }
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }
}

impl FromRef<GreeterState> for Arc<MetricsRegistry> {
    fn from_ref(state: &GreeterState) -> Self {
        Arc::clone(&state.metrics)
    }
}
