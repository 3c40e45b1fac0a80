//! Concurrent fan-out to every vault
//!
//! One branch per vault, all started at once and joined at a single barrier.
//! Each branch carries its own timeout, so a dead vault delays only its own
//! branch. A timed-out branch is abandoned; whatever the vault does with the
//! request afterwards is ignored.

use futures_util::future::join_all;
use std::future::Future;
use std::time::Duration;

use crate::common::{Error, Result};

/// Outcome of one branch of a fan-out.
#[derive(Debug)]
pub struct Reply<'a, T> {
    pub vault: &'a str,
    pub result: Result<T>,
}

/// Run `call` against every vault concurrently and wait for all branches to
/// resolve, successfully or not. Replies come back in vault order.
pub async fn fan_out<'a, T, F, Fut>(
    vaults: &'a [String],
    timeout: Duration,
    call: F,
) -> Vec<Reply<'a, T>>
where
    F: Fn(&'a str) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let branches = vaults.iter().map(|vault| {
        let vault = vault.as_str();
        let request = call(vault);
        async move {
            let result = match tokio::time::timeout(timeout, request).await {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout(format!(
                    "vault {} did not answer within {:?}",
                    vault, timeout
                ))),
            };
            Reply { vault, result }
        }
    });
    join_all(branches).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn vaults(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("vault{}:80", i)).collect()
    }

    #[tokio::test]
    async fn test_replies_in_vault_order() {
        let vaults = vaults(4);
        let replies = fan_out(&vaults, Duration::from_secs(1), |vault| async move {
            Ok(vault.len())
        })
        .await;
        assert_eq!(replies.len(), 4);
        for (reply, vault) in replies.iter().zip(&vaults) {
            assert_eq!(reply.vault, vault);
            assert_eq!(*reply.result.as_ref().unwrap(), vault.len());
        }
    }

    #[tokio::test]
    async fn test_slow_branch_times_out_alone() {
        let vaults = vaults(3);
        let replies = fan_out(&vaults, Duration::from_millis(50), |vault| async move {
            if vault == "vault1:80" {
                std::future::pending::<()>().await;
            }
            Ok(())
        })
        .await;
        assert!(replies[0].result.is_ok());
        assert!(matches!(replies[1].result, Err(Error::Timeout(_))));
        assert!(replies[2].result.is_ok());
    }

    #[tokio::test]
    async fn test_branches_run_concurrently() {
        let vaults = vaults(5);
        let start = Instant::now();
        let replies = fan_out(&vaults, Duration::from_secs(5), |_| async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(())
        })
        .await;
        assert!(replies.iter().all(|r| r.result.is_ok()));
        // Sequential execution would take 500ms.
        assert!(start.elapsed() < Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_errors_are_reported_per_branch() {
        let vaults = vaults(2);
        let replies = fan_out(&vaults, Duration::from_secs(1), |vault| async move {
            if vault == "vault0:80" {
                Err(Error::VaultUnreachable {
                    vault: vault.to_string(),
                    reason: "connection refused".into(),
                })
            } else {
                Ok(1u64)
            }
        })
        .await;
        assert!(replies[0].result.is_err());
        assert_eq!(*replies[1].result.as_ref().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_vault_set() {
        let replies = fan_out(&[], Duration::from_secs(1), |_| async { Ok(()) }).await;
        assert!(replies.is_empty());
    }
}
