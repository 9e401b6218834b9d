//! Axum router wiring for both gateways.

use axum::{routing::get, Router};

use crate::app_state::{GreeterState, RepoGatewayState};
use crate::{ops, services};

/// Route paths, also used as the `path` label of the hit counter.
pub mod paths {
    pub const ROOT: &str = "/";
    pub const MY_REPOS: &str = "/myrepos";
    pub const VARS: &str = "/vars";
    pub const HEALTH: &str = "/health";
}

/// Repository gateway: `/`, `/myrepos`, `/vars`.
pub fn build_repo_router(state: RepoGatewayState) -> Router {
    Router::new()
        .route(paths::ROOT, get(services::repos::root))
        .route(paths::MY_REPOS, get(services::repos::my_repos))
        .route(paths::VARS, get(ops::vars))
        .with_state(state)
}

/// Greeter gateway: `/`, `/health`, `/vars`.
pub fn build_greeter_router(state: GreeterState) -> Router {
    Router::new()
        .route(paths::ROOT, get(services::greeter::hello))
        .route(paths::HEALTH, get(ops::health))
        .route(paths::VARS, get(ops::vars))
        .with_state(state)
}
