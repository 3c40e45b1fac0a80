//! CLI for talking to a coordinator

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quorum-counter")]
#[command(about = "Read and write the quorum-replicated counter")]
#[command(version)]
struct Cli {
    /// Coordinator URL
    #[arg(long, default_value = "http://localhost:8000")]
    control: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the consensus value
    Get,

    /// Write a new value
    Set {
        /// Value (must not be lower than the last accepted one)
        value: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(cli.timeout))
        .build()?;
    let url = format!("{}/", cli.control.trim_end_matches('/'));

    match cli.command {
        Commands::Get => {
            let response = client
                .get(&url)
                .send()
                .await
                .with_context(|| format!("contacting coordinator at {}", url))?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                bail!("no consensus ({}): {}", status, body.trim());
            }
            println!("{}", body.trim());
        }
        Commands::Set { value } => {
            let response = client
                .post(&url)
                .body(value.to_string())
                .send()
                .await
                .with_context(|| format!("contacting coordinator at {}", url))?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                bail!("write failed ({}): {}", status, body.trim());
            }
            println!("{}", body.trim());
        }
    }

    Ok(())
}
