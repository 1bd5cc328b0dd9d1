use std::process::ExitCode;

use devcamper::{Config, startup, telemetry};
use tokio::net::TcpListener;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    // Loading the config merges config/config.env into the environment, so a
    // RUST_LOG set there is visible to the subscriber.
    let config = Config::load();

    if let Err(e) = telemetry::init() {
        eprintln!("failed to install tracing subscriber: {e}");
    }

    // Single exit point for fatal errors.
    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: devcamper::Result<Config>) -> devcamper::Result<()> {
    let config = config?;
    let listener = TcpListener::bind(config.socket_addr()).await?;
    startup::run(config, listener).await
}
