//! Coordinator server

use crate::common::{ControlConfig, Result};
use crate::coordinator::control::Control;
use crate::coordinator::http::{create_router, CoordState};
use crate::coordinator::vault_client::HttpVaultClient;
use std::sync::Arc;

pub struct Coordinator {
    config: ControlConfig,
}

impl Coordinator {
    pub fn new(config: ControlConfig) -> Self {
        Self { config }
    }

    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already-bound listener.
    pub async fn serve_on(self, listener: tokio::net::TcpListener) -> Result<()> {
        self.config.validate()?;
        let vaults = self.config.vault_addrs();
        let timeout = self.config.replica_timeout();

        tracing::info!("Starting coordinator on {}", listener.local_addr()?);
        tracing::info!("  Vaults: {}", vaults.join(","));
        tracing::info!("  Replica timeout: {:?}", timeout);
        tracing::info!("Defined {} vaults", vaults.len());
        if vaults.is_empty() {
            tracing::warn!("No vaults configured: every read and write will fail");
        }

        let client = HttpVaultClient::new(timeout)?;
        let control = Arc::new(Control::new(vaults, client, timeout));
        tracing::info!("  Quorum: {}", control.quorum());
        let router = create_router(CoordState { control });

        axum::serve(listener, router)
            .with_graceful_shutdown(crate::shutdown_signal())
            .await?;

        tracing::info!("Coordinator stopped");
        Ok(())
    }
}
