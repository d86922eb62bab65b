use crate::ProducerConfig;
use quay_core::*;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// Interface for feeding Quay queues with synthetic messages at a steady rate
pub struct Producer<Q: QueueClient> {
    client: Q,
    config: ProducerConfig,
    shutdown: Shutdown,
}

impl<Q: QueueClient> Producer<Q> {
    pub fn with_client(client: Q) -> Self {
        Self {
            client,
            config: ProducerConfig::default(),
            shutdown: Shutdown::new(),
        }
    }

    pub fn with_config(mut self, config: ProducerConfig) -> Self {
        self.config = config;
        self
    }

    /// Share a stop flag with whoever listens for signals
    pub fn with_shutdown(mut self, shutdown: Shutdown) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn shutdown(&self) -> &Shutdown {
        &self.shutdown
    }

    /// Send a batch every send interval until a stop is requested;
    /// failed sends are logged and skipped
    pub async fn run(&self) -> Result<()> {
        let mut window = ThroughputWindow::new(self.config.get_report_interval());

        while !self.shutdown.is_stopping() {
            match self.send_next_batch().await {
                Ok(sent) => window.record(sent),
                Err(e) => error!(error = %e, "Failed to send messages"),
            }

            if let Some(report) = window.flush_if_due() {
                info!(
                    sent = report.count,
                    "Sent {} messages in last {:.2?}", report.count, report.elapsed
                );
            }

            sleep(self.config.get_send_interval()).await;
        }

        info!("Producer finished");
        Ok(())
    }

    /// Send one batch of synthetic messages and return how many were sent
    pub async fn send_next_batch(&self) -> Result<usize> {
        let entries = synthetic_batch(self.config.get_batch_size());
        self.client.send(&entries).await?;

        debug!(count = entries.len(), "Batch sent");
        Ok(entries.len())
    }
}

/// Entries numbered from zero, each with a fresh ULID as body
pub fn synthetic_batch(size: usize) -> Vec<SendEntry> {
    (0..size)
        .map(|index| SendEntry::new(index, generate_id()))
        .collect()
}
