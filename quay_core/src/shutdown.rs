use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide stop request, observed cooperatively by the run loops.
///
/// Goes from running to stopping once and never back; clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    stopping: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop; returns `true` only for the call that flipped the flag
    pub fn trigger(&self) -> bool {
        !self.stopping.swap(true, Ordering::SeqCst)
    }

    pub fn is_stopping(&self) -> bool {
        self.stopping.load(Ordering::SeqCst)
    }
}
