//! Route handlers with gateway-specific behavior.

pub mod greeter;
pub mod repos;

use axum::{
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

pub(crate) const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Single buffered plain-text write, status 200.
pub(crate) fn text_response(body: impl Into<String>) -> Response {
    ([(CONTENT_TYPE, TEXT_PLAIN)], body.into()).into_response()
}
