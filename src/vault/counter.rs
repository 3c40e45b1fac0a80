//! The vault's single counter

use tokio::sync::Mutex;

/// A lock-guarded counter, created at zero.
///
/// The vault performs no ordering checks of its own: a write that moves the
/// value backwards is logged as an anomaly and applied anyway. Ordering is
/// enforced by the coordinator at admission time.
#[derive(Debug)]
pub struct VaultCounter {
    name: String,
    value: Mutex<u64>,
}

impl VaultCounter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Mutex::new(0),
        }
    }

    /// Current value. Never fails.
    pub async fn get(&self) -> u64 {
        let value = *self.value.lock().await;
        tracing::debug!("Get vault {} value={}", self.name, value);
        value
    }

    /// Overwrite the value, returning what was stored.
    pub async fn set(&self, new_value: u64) -> u64 {
        let mut value = self.value.lock().await;
        if let Some(warning) = regression_warning(&self.name, *value, new_value) {
            tracing::warn!("{}", warning);
        }
        *value = new_value;
        tracing::info!("Set vault {} counter {}", self.name, new_value);
        new_value
    }
}

/// The anomaly logged when a write moves a vault's counter backwards.
fn regression_warning(name: &str, current: u64, requested: u64) -> Option<String> {
    (requested < current).then(|| {
        format!(
            "THIS SHOULD NEVER HAPPEN: vault {} counter regressed from {} to {}",
            name, current, requested
        )
    })
}
