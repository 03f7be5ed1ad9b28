//! Blog worker entry point
//!
//! Run with:
//! ```bash
//! cargo run -p blog-worker                      # process tasks
//! cargo run -p blog-worker -- requeue-archived  # retry archived tasks
//! ```
//!
//! Reads the same environment as the API server.

use blog_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use blog_worker::Command;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let command = match Command::parse(std::env::args().nth(1).as_deref()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    info!(app = %config.app.name, env = ?config.app.env, ?command, "Starting Blog Worker");

    let result = match command {
        Command::Run => blog_worker::run(config).await,
        Command::RequeueArchived => blog_worker::requeue_archived(&config)
            .await
            .map(|total| info!(total, "Archived tasks requeued")),
    };

    if let Err(e) = result {
        error!(error = %e, "Worker failed");
        std::process::exit(1);
    }
}
