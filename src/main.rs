//! Multi-tenant reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request            ┌──────────────────────────────────────────────┐
//!     ──────────────────────────┼─▶ http server ─▶ resolver ─▶ load_balancer   │
//!                               │                   │  ▲                        │
//!                               │     routing table ┘  └ resolution cache      │
//!                               │          ▲                     ▲              │
//!     config.toml ─▶ watcher ───┼─▶ config manager (swap) ─▶ invalidate        │
//!                               │                                               │
//!     Client Response           │                                               │
//!     ◀─────────────────────────┼── forwarder ◀──────────────────────── Backend │
//!                               └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use tenant_router::lifecycle::startup;
use tenant_router::observability::logging;

#[derive(Parser)]
#[command(name = "tenant-router")]
#[command(about = "Multi-tenant reverse proxy", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init();

    tracing::info!("tenant-router v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(cli.config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
