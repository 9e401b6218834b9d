//! Repository gateway.
//!
//! - `GET /`        : upstream API root, relayed as text
//! - `GET /myrepos` : streamed repository listing
//! - `GET /vars`    : metrics

use hubgate_gateway::{config, server};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    hubgate_gateway::init_tracing();

    let result = match config::load_or_default(config::DEFAULT_CONFIG_FILE) {
        Ok(cfg) => server::run_repo_gateway(cfg).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(code = e.client_code().as_str(), error = %e, "hubgate-gateway exited");
        std::process::exit(1);
    }
}
