//! Quorum-coordinated reads and writes
//!
//! The coordinator owns one piece of state, `last_accepted`: the value of
//! the most recent write that reached a majority of vaults. It never
//! decreases, is advanced only by a successful write, and is used only to
//! turn away writes that would move the counter backwards.

use std::time::Duration;
use tokio::sync::Mutex;

use crate::common::{has_majority, majority, Error, Result, VoteTally};
use crate::coordinator::fanout::fan_out;
use crate::coordinator::vault_client::VaultClient;

/// Result of a write that reached quorum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteReport {
    pub value: u64,
    pub acked: usize,
    pub total: usize,
}

impl std::fmt::Display for WriteReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sent updates to {}/{} vaults", self.acked, self.total)
    }
}

pub struct Control<C> {
    vaults: Vec<String>,
    client: C,
    replica_timeout: Duration,
    last_accepted: Mutex<u64>,
}

impl<C: VaultClient> Control<C> {
    /// `vaults` is fixed for the lifetime of the coordinator, and with it the
    /// quorum threshold.
    pub fn new(vaults: Vec<String>, client: C, replica_timeout: Duration) -> Self {
        Self {
            vaults,
            client,
            replica_timeout,
            last_accepted: Mutex::new(0),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Number of agreeing vaults needed for a read or write to succeed.
    pub fn quorum(&self) -> usize {
        majority(self.vaults.len())
    }

    pub async fn last_accepted(&self) -> u64 {
        *self.last_accepted.lock().await
    }

    /// Set `value` on every vault and commit it if a majority acknowledged.
    ///
    /// The admission check and the commit happen under one lock, so writes
    /// are serialized and `last_accepted` can never be committed out of
    /// order. On failure the vaults that did take the write keep it: there is
    /// no rollback.
    pub async fn write(&self, value: u64) -> Result<WriteReport> {
        let mut last_accepted = self.last_accepted.lock().await;
        if value < *last_accepted {
            let err = Error::Regression {
                current: *last_accepted,
                requested: value,
            };
            tracing::warn!("{}", err);
            return Err(err);
        }

        let replies = fan_out(&self.vaults, self.replica_timeout, |vault| {
            tracing::debug!("Setting vault {} value to {}", vault, value);
            self.client.store(vault, value)
        })
        .await;

        let mut acked = 0;
        for reply in replies {
            let result = reply.result.and_then(|echoed| {
                if echoed == value {
                    Ok(())
                } else {
                    Err(Error::EchoMismatch {
                        vault: reply.vault.to_string(),
                        expected: value,
                        echoed,
                    })
                }
            });
            match result {
                Ok(()) => acked += 1,
                Err(e) => tracing::warn!("Error setting vault {} value to {}: {}", reply.vault, value, e),
            }
        }

        let total = self.vaults.len();
        if !has_majority(acked, total) {
            tracing::warn!(
                "Write of {} reached {}/{} vaults, {} needed",
                value,
                acked,
                total,
                self.quorum()
            );
            return Err(Error::QuorumNotReached { acked, total });
        }

        *last_accepted = value;
        tracing::info!("Committed {} on {}/{} vaults", value, acked, total);
        Ok(WriteReport {
            value,
            acked,
            total,
        })
    }

    /// Poll every vault and return the value a majority agrees on.
    ///
    /// Among values tied for the most votes the largest wins (see
    /// [`VoteTally::leader`]); the result still needs a majority of the
    /// configured vaults. Reads never touch `last_accepted`.
    pub async fn read(&self) -> Result<u64> {
        let replies = fan_out(&self.vaults, self.replica_timeout, |vault| {
            self.client.fetch(vault)
        })
        .await;

        let mut tally = VoteTally::new();
        for reply in replies {
            match reply.result {
                Ok(value) => {
                    tracing::debug!("Get vault {} value {}", reply.vault, value);
                    tally.record(value);
                }
                Err(e) => tracing::warn!("Error getting value from vault {}: {}", reply.vault, e),
            }
        }
        tracing::info!("Counts data: {}", tally);

        let total = self.vaults.len();
        if tally.is_empty() {
            tracing::error!("Could not reach any vaults to get counts data");
            return Err(Error::NoConsensus { total });
        }
        match tally.consensus(total) {
            Some(value) => Ok(value),
            None => {
                tracing::warn!(
                    "No majority; only have {}/{} with a consensus value",
                    tally.max_count(),
                    total
                );
                Err(Error::NoConsensus { total })
            }
        }
    }
}
