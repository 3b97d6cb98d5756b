//! Startup readiness gate.
//!
//! Before the server accepts requests both storage targets must answer a
//! probe. The gate retries a fixed number of times with a fixed delay and
//! gives up with [`ReadinessError`], which the server treats as fatal.

use std::time::Duration;

use crate::error::StoreError;
use crate::storage::Storage;

/// Default number of probe attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Default delay between probe attempts in seconds.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

/// Retry bounds for the readiness gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Total number of probes before giving up. Zero is treated as one.
    pub max_attempts: u32,
    /// Pause between consecutive probes.
    pub delay: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

/// Storage never became reachable within the policy's bounds.
#[derive(Debug, thiserror::Error)]
#[error("storage not ready after {attempts} attempts: {last_error}")]
pub struct ReadinessError {
    /// How many probes were made.
    pub attempts: u32,
    /// The error from the final probe.
    pub last_error: StoreError,
}

/// Probe `storage` until it answers or the policy is exhausted.
///
/// Returns the attempt number that succeeded.
pub async fn wait_until_ready(
    storage: &Storage,
    policy: ReadinessPolicy,
) -> Result<u32, ReadinessError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt: u32 = 1;

    loop {
        match storage.ping().await {
            Ok(()) => {
                tracing::info!(attempt, backend = storage.name(), "Storage is ready");
                return Ok(attempt);
            }
            Err(e) if attempt >= max_attempts => {
                tracing::error!(attempt, error = %e, "Storage readiness gate exhausted");
                return Err(ReadinessError {
                    attempts: attempt,
                    last_error: e,
                });
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_secs = policy.delay.as_secs(),
                    error = %e,
                    "Storage not ready, retrying"
                );
                tokio::time::sleep(policy.delay).await;
                attempt = attempt.saturating_add(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let store = MemoryStore::default();
        store.set_available(false);
        let storage = Storage::Memory(store);

        let started = tokio::time::Instant::now();
        let result = wait_until_ready(&storage, ReadinessPolicy::default()).await;

        let err = result.err();
        assert_eq!(err.as_ref().map(|e| e.attempts), Some(10));
        assert!(matches!(
            err.map(|e| e.last_error),
            Some(StoreError::Unavailable(_))
        ));
        // Nine pauses between ten probes.
        assert_eq!(started.elapsed(), Duration::from_secs(45));
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_once_storage_comes_up() {
        let store = MemoryStore::default();
        store.set_available(false);
        let storage = Storage::Memory(store.clone());

        let flip = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(12)).await;
            store.set_available(true);
        });

        let attempt = wait_until_ready(&storage, ReadinessPolicy::default()).await.ok();
        assert_eq!(attempt, Some(4));
        assert!(flip.await.is_ok());
    }

    #[tokio::test]
    async fn zero_attempts_still_probes_once() {
        let storage = Storage::Memory(MemoryStore::default());
        let policy = ReadinessPolicy {
            max_attempts: 0,
            delay: Duration::from_millis(1),
        };
        assert_eq!(wait_until_ready(&storage, policy).await.ok(), Some(1));
    }
}
