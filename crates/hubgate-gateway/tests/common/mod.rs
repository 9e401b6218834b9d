//! In-process mock of the upstream API, bound on an ephemeral port.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    routing::get,
    Router,
};
use serde_json::json;
use tower::ServiceExt;

use hubgate_core::Credential;
use hubgate_gateway::app_state::RepoGatewayState;
use hubgate_gateway::config::UpstreamSection;
use hubgate_gateway::obs::MetricsRegistry;
use hubgate_gateway::upstream::UpstreamClient;

/// Echoes the auth-related request headers back as a JSON object.
async fn api_root(headers: HeaderMap) -> axum::Json<serde_json::Value> {
    let h = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or("").to_string();
    axum::Json(json!({
        "authorization": h("authorization"),
        "accept": h("accept"),
        "user_agent": h("user-agent"),
    }))
}

async fn user_repos() -> axum::Json<serde_json::Value> {
    axum::Json(json!([
        { "id": 1, "full_name": "a/b" },
        { "id": 2, "full_name": "c/d" },
    ]))
}

async fn unauthorized() -> (StatusCode, &'static str) {
    (StatusCode::UNAUTHORIZED, "{\"message\":\"Bad credentials\"}")
}

async fn server_error() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn not_a_list() -> axum::Json<serde_json::Value> {
    axum::Json(json!({ "full_name": "a/b" }))
}

async fn not_an_object() -> axum::Json<serde_json::Value> {
    axum::Json(json!(["a", "b"]))
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Upstream that answers every route successfully.
pub async fn healthy_upstream() -> SocketAddr {
    spawn(Router::new().route("/", get(api_root)).route("/user/repos", get(user_repos))).await
}

/// Upstream that rejects the root with 401 and the listing with 500.
pub async fn failing_upstream() -> SocketAddr {
    spawn(Router::new().route("/", get(unauthorized)).route("/user/repos", get(server_error))).await
}

/// Upstream whose root is an array and whose listing is an object.
pub async fn malformed_upstream() -> SocketAddr {
    spawn(Router::new().route("/", get(not_an_object)).route("/user/repos", get(not_a_list))).await
}

/// An address nothing listens on.
pub async fn dead_upstream() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn repo_state(addr: SocketAddr, token: &str) -> RepoGatewayState {
    let cfg = UpstreamSection {
        base_url: format!("http://{addr}"),
        ..UpstreamSection::default()
    };
    let cred = Credential::parse(token).unwrap();
    let client = UpstreamClient::new(&cfg, &cred).unwrap();
    RepoGatewayState::new(Arc::new(MetricsRegistry::new()), client)
}

/// Issue a GET against `app` and return (status, body).
pub async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("request success");
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.expect("read body");
    (status, String::from_utf8(body.to_vec()).expect("utf8"))
}
