use quay::consume::Workload;
use quay::core::{QuayError, Result};
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::debug;

/// Stand-in for real business logic: a CPU-bound SHA-256 loop over the body
/// followed by a fixed pause that plays the part of network latency
#[derive(Debug, Clone)]
pub struct HashingWorkload {
    rounds: usize,
    delay: Duration,
}

impl Default for HashingWorkload {
    fn default() -> Self {
        Self {
            rounds: 500_000,
            delay: Duration::from_millis(50),
        }
    }
}

impl HashingWorkload {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the body is fed into the hasher
    pub fn rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Workload for HashingWorkload {
    async fn process(&self, body: &str) -> Result<()> {
        let started = Instant::now();
        let rounds = self.rounds;
        let bytes = body.as_bytes().to_vec();

        let digest = tokio::task::spawn_blocking(move || {
            let mut hasher = Sha256::new();
            for _ in 0..rounds {
                hasher.update(&bytes);
            }
            hasher.finalize()
        })
        .await
        .map_err(|e| QuayError::Workload(format!("hashing task failed: {}", e)))?;

        sleep(self.delay).await;

        debug!(digest = %format!("{:x}", digest), elapsed = ?started.elapsed(), "Workload done");
        Ok(())
    }
}
