use quay_core::MAX_SEND_BATCH;
use std::time::Duration;

/// Configuration options for a Producer
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// Messages per send call; kept within 1 to `MAX_SEND_BATCH`
    batch_size: usize,

    /// How long to sleep between send calls
    send_interval: Duration,

    /// How often to log the throughput
    report_interval: Duration,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            batch_size: 3,
            send_interval: Duration::from_secs(1),
            report_interval: Duration::from_secs(2),
        }
    }
}

impl ProducerConfig {
    pub fn new() -> ProducerConfig {
        ProducerConfig::default()
    }

    pub fn batch_size(mut self, batch_size: usize) -> ProducerConfig {
        self.batch_size = batch_size.clamp(1, MAX_SEND_BATCH);
        self
    }
    pub fn get_batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn send_interval(mut self, send_interval: Duration) -> ProducerConfig {
        self.send_interval = send_interval;
        self
    }
    pub fn get_send_interval(&self) -> Duration {
        self.send_interval
    }

    pub fn report_interval(mut self, report_interval: Duration) -> ProducerConfig {
        self.report_interval = report_interval;
        self
    }
    pub fn get_report_interval(&self) -> Duration {
        self.report_interval
    }
}
