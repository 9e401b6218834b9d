#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hubgate_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
upstream:
  base_url: "https://api.github.com"
  bse_url: "typo"
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.upstream.base_url, "https://api.github.com");
    assert_eq!(cfg.upstream.repos_path, "/user/repos");
    assert_eq!(cfg.upstream.identifier_field, "full_name");
    assert_eq!(cfg.credential.file.to_str(), Some("github-token"));
    assert_eq!(cfg.metrics.collect_timeout_ms, 5000);
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
credential:
  file: /etc/hubgate/token
upstream:
  base_url: "http://127.0.0.1:9000/"
  repos_path: /orgs/acme/repos
  user_agent: acme-gw
  identifier_field: name
metrics:
  collect_interval_ms: 2000
  collect_timeout_ms: 500
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.upstream.repos_path, "/orgs/acme/repos");
    assert_eq!(cfg.metrics.interval().as_millis(), 2000);
}

#[test]
fn timeout_must_be_below_interval() {
    let bad = r#"
version: 1
metrics:
  collect_interval_ms: 2000
  collect_timeout_ms: 2000
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_wrong_version_and_scheme() {
    assert!(config::load_from_str("version: 2\n").is_err());
    assert!(config::load_from_str("version: 1\nupstream:\n  base_url: ftp://x\n").is_err());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config::load_or_default(dir.path().join("hubgate.yaml")).unwrap();
    assert_eq!(cfg.version, 1);
}

#[test]
fn identity_default() {
    assert_eq!(config::identity_from(None), "UNKNOWN");
    assert_eq!(config::identity_from(Some("a".into())), "a");
}
