//! Coordinator binary

use clap::Parser;
use quorum_counter::common::{init_tracing, parse_vault_list, Config};
use quorum_counter::Coordinator;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quorum-control")]
#[command(about = "Quorum counter coordinator")]
#[command(version)]
struct Args {
    /// Port on which to listen for requests
    #[arg(long)]
    port: Option<u16>,

    /// Comma-separated list of vaults (host:port)
    #[arg(long)]
    vaults: Option<String>,

    /// Per-vault request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Optional TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // File and environment first, then CLI flags on top
    let mut config = Config::load(args.config.as_deref())?
        .control
        .unwrap_or_default();
    if let Some(port) = args.port {
        config.bind_addr = SocketAddr::new(config.bind_addr.ip(), port);
    }
    if let Some(vaults) = args.vaults {
        config.vaults = parse_vault_list(&vaults);
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.replica_timeout_ms = timeout_ms;
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }

    init_tracing(&config.log_level);
    tracing::info!("Coordinator booting (v{})", quorum_counter::VERSION);

    Coordinator::new(config).serve().await?;
    Ok(())
}
