//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use hubgate_core::error::{GatewayError, Result};

pub use schema::{CredentialSection, GatewayConfig, MetricsSection, UpstreamSection};

/// Default config file looked up next to the binary's working directory.
pub const DEFAULT_CONFIG_FILE: &str = "hubgate.yaml";

/// Environment variable naming the greeter instance.
pub const IDENTITY_ENV: &str = "SERVER_NAME";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| GatewayError::Config(format!("read config {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

/// Like `load_from_file`, but a missing file yields the defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(_) => load_from_file(path),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            Ok(GatewayConfig::default())
        }
        Err(e) => Err(GatewayError::Config(format!("stat config {} failed: {e}", path.display()))),
    }
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| GatewayError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Greeter identity from an optional external value, `UNKNOWN` when unset.
pub fn identity_from(value: Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "UNKNOWN".to_string(),
    }
}
