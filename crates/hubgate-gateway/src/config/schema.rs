use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use hubgate_core::error::{GatewayError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub credential: CredentialSection,

    #[serde(default)]
    pub upstream: UpstreamSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            credential: CredentialSection::default(),
            upstream: UpstreamSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GatewayError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.upstream.validate()?;
        self.metrics.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialSection {
    #[serde(default = "default_credential_file")]
    pub file: PathBuf,
}

impl Default for CredentialSection {
    fn default() -> Self {
        Self { file: default_credential_file() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_repos_path")]
    pub repos_path: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_accept")]
    pub accept: String,

    #[serde(default = "default_identifier_field")]
    pub identifier_field: String,
}

impl Default for UpstreamSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            repos_path: default_repos_path(),
            user_agent: default_user_agent(),
            accept: default_accept(),
            identifier_field: default_identifier_field(),
        }
    }
}

impl UpstreamSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(GatewayError::Config(
                "upstream.base_url must be an http(s) URL".into(),
            ));
        }
        if !self.repos_path.starts_with('/') {
            return Err(GatewayError::Config(
                "upstream.repos_path must start with '/'".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(GatewayError::Config("upstream.user_agent must not be empty".into()));
        }
        if self.identifier_field.is_empty() {
            return Err(GatewayError::Config(
                "upstream.identifier_field must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_collect_interval_ms")]
    pub collect_interval_ms: u64,

    #[serde(default = "default_collect_timeout_ms")]
    pub collect_timeout_ms: u64,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            collect_interval_ms: default_collect_interval_ms(),
            collect_timeout_ms: default_collect_timeout_ms(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if !(1000..=600000).contains(&self.collect_interval_ms) {
            return Err(GatewayError::Config(
                "metrics.collect_interval_ms must be between 1000 and 600000".into(),
            ));
        }
        if self.collect_timeout_ms == 0 || self.collect_timeout_ms >= self.collect_interval_ms {
            return Err(GatewayError::Config(
                "metrics.collect_timeout_ms must be non-zero and less than collect_interval_ms".into(),
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.collect_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.collect_timeout_ms)
    }
}

fn default_credential_file() -> PathBuf {
    PathBuf::from("github-token")
}
fn default_base_url() -> String {
    "https://api.github.com".into()
}
fn default_repos_path() -> String {
    "/user/repos".into()
}
fn default_user_agent() -> String {
    concat!("hubgate/", env!("CARGO_PKG_VERSION")).into()
}
fn default_accept() -> String {
    "application/vnd.github.v3+json".into()
}
fn default_identifier_field() -> String {
    "full_name".into()
}
fn default_collect_interval_ms() -> u64 {
    10000
}
fn default_collect_timeout_ms() -> u64 {
    5000
}
