//! `quay_produce` provides the synthetic message producer for Quay queues.
//!
//! The Producer sends small batches of uniquely identified messages on a
//! fixed cadence; sends are fire-and-forget once the queue accepted them.

mod producer;
mod producer_config;

pub use producer::{Producer, synthetic_batch};
pub use producer_config::ProducerConfig;

pub mod prelude {
    pub use crate::{Producer, ProducerConfig};
}
