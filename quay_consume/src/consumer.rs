use crate::{ConsumerConfig, Workload};
use quay_core::{
    Message, QuayError, QueueClient, ReceiveRequest, Result, Shutdown, ThroughputWindow,
    WindowReport,
};
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Interface for receiving, processing and acknowledging messages from Quay queues.
///
/// Messages of a batch are processed one after another in receipt order and
/// each is deleted right after its workload succeeds, before the next starts.
pub struct Consumer<Q: QueueClient, W: Workload> {
    client: Q,
    config: ConsumerConfig,
    workload: W,
    shutdown: Shutdown,
    reports: Option<UnboundedSender<WindowReport>>,
}

/// What happened to the messages of one receive call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Messages delivered by the receive call
    pub received: usize,
    /// Processed and deleted
    pub succeeded: usize,
    /// Workload failed; left for redelivery
    pub failed: usize,
    /// Processed but the delete did not go through
    pub delete_failed: usize,
}

enum Settled {
    Deleted,
    ProcessFailed,
    DeleteFailed,
}

impl<Q: QueueClient, W: Workload> Consumer<Q, W> {
    pub fn with_client(client: Q, workload: W) -> Self {
        Self {
            client,
            config: ConsumerConfig::default(),
            workload,
            shutdown: Shutdown::new(),
            reports: None,
        }
    }

    pub fn with_config(mut self, config: ConsumerConfig) -> Self {
        self.config = config;
        self
    }

    /// Share a stop flag with whoever listens for signals
    pub fn with_shutdown(mut self, shutdown: Shutdown) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Forward every flushed throughput window to `sender` in addition to logging it
    pub fn with_report_sink(mut self, sender: UnboundedSender<WindowReport>) -> Self {
        self.reports = Some(sender);
        self
    }

    pub fn shutdown(&self) -> &Shutdown {
        &self.shutdown
    }

    pub fn config(&self) -> &ConsumerConfig {
        &self.config
    }

    /// Receive and process batches until a stop is requested.
    ///
    /// The stop flag is checked before every receive, so a batch that has
    /// been received is always processed to the end.
    pub async fn run(&self) -> Result<()> {
        let mut window = ThroughputWindow::new(self.config.get_report_interval());
        let mut consecutive_errors = 0;

        while !self.shutdown.is_stopping() {
            match self.run_next_batch().await {
                Ok(summary) => {
                    consecutive_errors = 0;
                    window.record(summary.received);
                }
                Err(e) => {
                    consecutive_errors += 1;
                    error!(error = %e, consecutive_errors, "Failed to receive messages");

                    if let Some(max) = self.config.get_max_consecutive_errors()
                        && consecutive_errors >= max
                    {
                        return Err(QuayError::TooManyErrors(consecutive_errors));
                    }
                    sleep(self.config.get_error_backoff()).await;
                }
            }

            if let Some(report) = window.flush_if_due() {
                info!(
                    processed = report.count,
                    "Processed {} messages in last {:.2?}", report.count, report.elapsed
                );
                if let Some(reports) = &self.reports {
                    // receiver gone means nobody is listening anymore
                    let _ = reports.send(report);
                }
            }
        }

        info!("Consumer finished");
        Ok(())
    }

    /// Receive one batch and settle every message in it; only the receive itself can fail
    pub async fn run_next_batch(&self) -> Result<BatchSummary> {
        let batch = self.client.receive(self.receive_request()).await?;

        let mut summary = BatchSummary {
            received: batch.len(),
            ..BatchSummary::default()
        };
        for message in &batch {
            match self.settle(message).await {
                Settled::Deleted => summary.succeeded += 1,
                Settled::ProcessFailed => summary.failed += 1,
                Settled::DeleteFailed => summary.delete_failed += 1,
            }
        }

        Ok(summary)
    }

    fn receive_request(&self) -> ReceiveRequest {
        ReceiveRequest {
            max_messages: self.config.get_max_messages(),
            wait_time: self.config.get_wait_time(),
            visibility_timeout: self.config.get_visibility_timeout(),
        }
    }

    async fn settle(&self, message: &Message) -> Settled {
        debug!(
            message_id = %message.id,
            receive_count = message.receive_count,
            body = %message.body,
            "Received message"
        );

        let started = Instant::now();
        if let Err(e) = self.workload.process(&message.body).await {
            warn!(
                message_id = %message.id,
                receive_count = message.receive_count,
                error = %e,
                "Message processing failed, leaving it for redelivery"
            );
            return Settled::ProcessFailed;
        }
        debug!(message_id = %message.id, elapsed = ?started.elapsed(), "Message processed");

        match self.client.delete(message).await {
            Ok(()) => Settled::Deleted,
            Err(e) => {
                error!(message_id = %message.id, error = %e, "Failed to delete processed message");
                Settled::DeleteFailed
            }
        }
    }
}
