//! gee demo server.
//!
//! Serves two routes on the exact-match router:
//! - `GET /`      echoes the request path
//! - `GET /hello` echoes the request headers
//!
//! Everything else gets `404 NOT FOUND`.

use clap::Parser;
use std::path::PathBuf;

use gee::config::{load_config, validate_config, ConfigError, ServerConfig};
use gee::handlers;
use gee::observability::logging;
use gee::{HttpServer, Router};

#[derive(Parser)]
#[command(name = "gee")]
#[command(about = "Minimal exact-match HTTP dispatcher", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Log filter, overrides `observability.log_level`.
    #[arg(long)]
    log_level: Option<String>,

    /// Log as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    config.observability.json_logs |= cli.json_logs;
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability)?;

    tracing::info!("gee v{} starting", env!("CARGO_PKG_VERSION"));

    let mut router = Router::new();
    router.get("/", handlers::index).get("/hello", handlers::hello);

    let server = HttpServer::new(router, config);
    let config = server.config();
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    let addr = config.listener.bind_address.clone();
    server.run(&addr).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
