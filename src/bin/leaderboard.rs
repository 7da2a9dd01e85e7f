//! Leaderboard service binary.
//!
//! Configuration comes from `SNAKE_LEADERBOARD_*` environment variables;
//! `--host` and `--port` override them. Logs go to stderr, filtered by
//! `RUST_LOG` (default `info`).

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tui_snake::leaderboard::{run_server, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "snake-leaderboard", version, about = "Score service for tui-snake")]
struct Cli {
    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (0 picks a free port)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut config = ServerConfig::from_env();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    run_server(config, None).await
}
