//! # quorum-counter
//!
//! A quorum-replicated monotonic counter:
//! - A coordinator fronts all client reads and writes
//! - Every request fans out concurrently to a fixed set of vaults
//! - Writes succeed when a majority of vaults acknowledge them
//! - Reads return the value a majority of vaults agree on
//!
//! ## Architecture
//!
//! ```text
//!            ┌──────────────────────────────┐
//!  client ──►│         Coordinator          │
//!            │  last_accepted (never falls) │
//!            └──────────────┬───────────────┘
//!                           │ HTTP, one request per vault
//!   ┌───────────────┬───────┴───────┬───────────────┐
//! ┌─▼───────┐   ┌───▼─────┐   ┌─────▼───┐   ┌───────▼─┐
//! │ Vault 1 │   │ Vault 2 │   │ Vault 3 │   │ Vault N │
//! │ counter │   │ counter │   │ counter │   │ counter │
//! └─────────┘   └─────────┘   └─────────┘   └─────────┘
//! ```
//!
//! ## Usage
//!
//! ### Start vaults
//! ```bash
//! quorum-vault --port 8001
//! quorum-vault --port 8002
//! quorum-vault --port 8003
//! ```
//!
//! ### Start the coordinator
//! ```bash
//! quorum-control --port 8000 --vaults localhost:8001,localhost:8002,localhost:8003
//! ```
//!
//! ### Use the CLI
//! ```bash
//! quorum-counter set 5
//! quorum-counter get
//! ```

pub mod common;
pub mod coordinator;
pub mod vault;

// Re-export commonly used types
pub use common::{Config, Error, Result};
pub use coordinator::Coordinator;
pub use vault::VaultServer;

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolves on Ctrl-C (and SIGTERM on Unix), for graceful shutdown.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
