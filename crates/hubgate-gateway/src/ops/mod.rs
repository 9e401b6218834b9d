//! Operational HTTP endpoints.
//!
//! - `/health` : liveness
//! - `/vars`   : Prometheus text format

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};

use crate::obs::MetricsRegistry;
use crate::router::paths;
use crate::services::text_response;

pub async fn health(State(metrics): State<Arc<MetricsRegistry>>) -> Response {
    metrics.inc_hit(paths::HEALTH);
    text_response("ok\n")
}

pub async fn vars(State(metrics): State<Arc<MetricsRegistry>>) -> Response {
    metrics.inc_hit(paths::VARS);
    let body = metrics.render();

    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
