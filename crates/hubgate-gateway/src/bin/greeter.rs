//! Greeter gateway.
//!
//! - `GET /`       : `Hello, I am <SERVER_NAME>`
//! - `GET /health` : liveness
//! - `GET /vars`   : metrics

use hubgate_gateway::{config, server};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    hubgate_gateway::init_tracing();

    let identity = config::identity_from(std::env::var(config::IDENTITY_ENV).ok());
    let result = match config::load_or_default(config::DEFAULT_CONFIG_FILE) {
        Ok(cfg) => server::run_greeter(cfg, identity).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(code = e.client_code().as_str(), error = %e, "greeter exited");
        std::process::exit(1);
    }
}
