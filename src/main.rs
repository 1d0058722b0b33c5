//! Multi-tenant static site server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ layers (request id, trace, timeout, security headers)
//!                 │
//!                 ├── /site/*  ──▶ admin (API key) ──▶ tenant store (sites root)
//!                 │
//!                 └── everything else
//!                       ──▶ vhost gate   (Host → <root>/<host>/config.json)
//!                       ──▶ static stage (locale prefix → try_files → stream file)
//!                       ──▶ /health or 404
//! ```

use std::path::PathBuf;

use clap::Parser;
use vhost_server::config::load_config;
use vhost_server::lifecycle::startup;
use vhost_server::observability::logging;

#[derive(Parser)]
#[command(name = "vhost-server")]
#[command(about = "Serve many static sites from one process, selected by hostname", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "VHOST_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_tracing(&config.observability);
    tracing::info!("vhost-server v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
