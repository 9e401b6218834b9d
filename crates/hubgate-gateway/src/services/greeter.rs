use axum::{extract::State, response::Response};

use crate::app_state::GreeterState;
use crate::router::paths;

use super::text_response;

pub async fn hello(State(state): State<GreeterState>) -> Response {
    state.metrics().inc_hit(paths::ROOT);
    text_response(format!("Hello, I am {}", state.identity()))
}
