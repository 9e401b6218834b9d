//! Startup must fail before the listener exists when the credential is bad.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io::Write;
use std::time::Duration;

use hubgate_core::error::ClientCode;
use hubgate_gateway::config::GatewayConfig;
use hubgate_gateway::server;

async fn run_with_token_file(path: std::path::PathBuf) -> hubgate_core::GatewayError {
    let mut cfg = GatewayConfig::default();
    cfg.credential.file = path;

    // A run that got as far as listening would never return.
    tokio::time::timeout(Duration::from_secs(5), server::run_repo_gateway(cfg))
        .await
        .expect("startup must fail fast")
        .expect_err("startup must fail")
}

#[tokio::test]
async fn missing_token_file_never_listens() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_with_token_file(dir.path().join("github-token")).await;
    assert_eq!(err.client_code(), ClientCode::Config);
}

#[tokio::test]
async fn blank_token_file_never_listens() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(b"   \n").unwrap();
    let err = run_with_token_file(f.path().to_path_buf()).await;
    assert_eq!(err.client_code(), ClientCode::Config);
}

#[tokio::test]
async fn multi_line_token_file_never_listens() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(b"ab\ncd\n").unwrap();
    let err = run_with_token_file(f.path().to_path_buf()).await;
    assert_eq!(err.client_code(), ClientCode::Config);
}
