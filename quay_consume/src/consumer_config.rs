use quay_core::MAX_RECEIVE_BATCH;
use std::time::Duration;

/// Configuration options for a Consumer
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// Most messages to ask for per receive; kept within 1 to `MAX_RECEIVE_BATCH`
    max_messages: usize,

    /// How long each receive waits for messages to arrive or "long polling"
    wait_time: Duration,

    /// How long received messages stay hidden; must cover a whole batch of work
    visibility_timeout: Duration,

    /// How often to log the throughput
    report_interval: Duration,

    /// How long to pause after a failed receive
    error_backoff: Duration,

    /// Maximum number of consecutive receive errors before stopping, None retries forever
    max_consecutive_errors: Option<usize>,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            max_messages: MAX_RECEIVE_BATCH,
            wait_time: Duration::from_secs(1),
            visibility_timeout: Duration::from_secs(60),
            report_interval: Duration::from_secs(10),
            error_backoff: Duration::from_secs(1),
            max_consecutive_errors: None,
        }
    }
}

impl ConsumerConfig {
    pub fn new() -> ConsumerConfig {
        ConsumerConfig::default()
    }

    pub fn max_messages(mut self, max_messages: usize) -> ConsumerConfig {
        self.max_messages = max_messages.clamp(1, MAX_RECEIVE_BATCH);
        self
    }
    pub fn get_max_messages(&self) -> usize {
        self.max_messages
    }

    pub fn wait_time(mut self, wait_time: Duration) -> ConsumerConfig {
        self.wait_time = wait_time;
        self
    }
    pub fn get_wait_time(&self) -> Duration {
        self.wait_time
    }

    pub fn visibility_timeout(mut self, visibility_timeout: Duration) -> ConsumerConfig {
        self.visibility_timeout = visibility_timeout;
        self
    }
    pub fn get_visibility_timeout(&self) -> Duration {
        self.visibility_timeout
    }

    pub fn report_interval(mut self, report_interval: Duration) -> ConsumerConfig {
        self.report_interval = report_interval;
        self
    }
    pub fn get_report_interval(&self) -> Duration {
        self.report_interval
    }

    pub fn error_backoff(mut self, error_backoff: Duration) -> ConsumerConfig {
        self.error_backoff = error_backoff;
        self
    }
    pub fn get_error_backoff(&self) -> Duration {
        self.error_backoff
    }

    pub fn max_consecutive_errors(mut self, max_consecutive_errors: usize) -> ConsumerConfig {
        self.max_consecutive_errors = Some(max_consecutive_errors);
        self
    }
    pub fn get_max_consecutive_errors(&self) -> Option<usize> {
        self.max_consecutive_errors
    }
}
