//! Vault server

use crate::common::{Result, VaultConfig};
use crate::vault::counter::VaultCounter;
use crate::vault::http::{create_router, VaultState};
use std::sync::Arc;

pub struct VaultServer {
    config: VaultConfig,
    counter: Arc<VaultCounter>,
}

impl VaultServer {
    pub fn new(config: VaultConfig) -> Self {
        let counter = Arc::new(VaultCounter::new(config.bind_addr.to_string()));
        Self { config, counter }
    }

    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already-bound listener.
    pub async fn serve_on(self, listener: tokio::net::TcpListener) -> Result<()> {
        let local_addr = listener.local_addr()?;
        tracing::info!(
            "Vault listening on {} with counter at {}",
            local_addr,
            self.counter.get().await
        );

        let router = create_router(VaultState {
            counter: self.counter,
        });

        axum::serve(listener, router)
            .with_graceful_shutdown(crate::shutdown_signal())
            .await?;

        tracing::info!("Vault {} stopped", local_addr);
        Ok(())
    }
}
