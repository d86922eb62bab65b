use std::time::{Duration, Instant};

/// Counter over a fixed reporting period; the count starts from zero after every flush
#[derive(Debug, Clone)]
pub struct ThroughputWindow {
    period: Duration,
    started_at: Instant,
    count: u64,
}

/// What a window accumulated before it was flushed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowReport {
    pub count: u64,
    pub elapsed: Duration,
}

impl ThroughputWindow {
    pub fn new(period: Duration) -> Self {
        Self::starting_at(period, Instant::now())
    }

    pub fn starting_at(period: Duration, started_at: Instant) -> Self {
        Self {
            period,
            started_at,
            count: 0,
        }
    }

    pub fn record(&mut self, count: usize) {
        self.count += count as u64;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn flush_if_due(&mut self) -> Option<WindowReport> {
        self.flush_if_due_at(Instant::now())
    }

    /// Report and reset once strictly more than the period has passed since the window started
    pub fn flush_if_due_at(&mut self, now: Instant) -> Option<WindowReport> {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed <= self.period {
            return None;
        }

        let report = WindowReport {
            count: self.count,
            elapsed,
        };
        self.count = 0;
        self.started_at = now;
        Some(report)
    }
}
