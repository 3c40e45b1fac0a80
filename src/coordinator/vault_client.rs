//! Client side of the coordinator → vault protocol

use std::future::Future;
use std::time::Duration;

use crate::common::{parse_counter, Error, Result};

/// How the coordinator talks to a single vault.
///
/// Implementations report every failure (unreachable, bad status, malformed
/// body) as an error; the coordinator turns those into missing votes.
pub trait VaultClient: Send + Sync + 'static {
    /// Read the vault's current counter.
    fn fetch(&self, vault: &str) -> impl Future<Output = Result<u64>> + Send;

    /// Overwrite the vault's counter, returning the value it echoed back.
    fn store(&self, vault: &str, value: u64) -> impl Future<Output = Result<u64>> + Send;
}

/// `VaultClient` speaking the plain-text HTTP protocol of [`crate::vault::http`].
#[derive(Debug, Clone)]
pub struct HttpVaultClient {
    client: reqwest::Client,
}

impl HttpVaultClient {
    /// Build a client whose requests each give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        // No idle connection reuse: every request dials the vault, so a vault
        // that went away is seen as unreachable right away.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    fn url(vault: &str) -> String {
        format!("http://{}/", vault)
    }

    async fn read_reply(vault: &str, response: reqwest::Response) -> Result<u64> {
        let status = response.status();
        if !status.is_success() {
            return Err(Error::VaultStatus {
                vault: vault.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| unreachable_error(vault, e))?;
        parse_counter(&body).map_err(|_| Error::MalformedReply {
            vault: vault.to_string(),
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

fn unreachable_error(vault: &str, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(format!("vault {}", vault))
    } else {
        Error::VaultUnreachable {
            vault: vault.to_string(),
            reason: e.to_string(),
        }
    }
}

impl VaultClient for HttpVaultClient {
    async fn fetch(&self, vault: &str) -> Result<u64> {
        let response = self
            .client
            .get(Self::url(vault))
            .send()
            .await
            .map_err(|e| unreachable_error(vault, e))?;
        Self::read_reply(vault, response).await
    }

    async fn store(&self, vault: &str, value: u64) -> Result<u64> {
        let response = self
            .client
            .post(Self::url(vault))
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(value.to_string())
            .send()
            .await
            .map_err(|e| unreachable_error(vault, e))?;
        Self::read_reply(vault, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url() {
        assert_eq!(HttpVaultClient::url("vault1:8001"), "http://vault1:8001/");
    }

    #[tokio::test]
    async fn test_unreachable_vault_is_an_error() {
        // Bind then drop a listener to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let client = HttpVaultClient::new(Duration::from_millis(500)).unwrap();
        let err = client.fetch(&addr).await.unwrap_err();
        assert!(err.is_vault_error(), "unexpected error: {}", err);
        let err = client.store(&addr, 3).await.unwrap_err();
        assert!(err.is_vault_error(), "unexpected error: {}", err);
    }
}
