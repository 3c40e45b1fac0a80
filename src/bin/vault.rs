use anyhow::Result;
use clap::Parser;
use quorum_counter::common::{init_tracing, Config};
use quorum_counter::VaultServer;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quorum-vault")]
#[command(about = "Quorum counter vault - holds one replicated counter")]
#[command(version)]
struct Args {
    /// Port on which to listen for requests
    #[arg(long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Optional TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?
        .vault
        .unwrap_or_default();
    if let Some(port) = args.port {
        config.bind_addr = SocketAddr::new(config.bind_addr.ip(), port);
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }

    init_tracing(&config.log_level);
    tracing::info!("Starting vault on {}", config.bind_addr);

    VaultServer::new(config).serve().await?;
    Ok(())
}
