//! Quay consumer components for draining a queue
//!
//! The Consumer receives batches of messages, hands each one to a Workload
//! and deletes it only after the Workload succeeded.

mod consumer;
mod consumer_config;
mod workload;

pub use consumer::{BatchSummary, Consumer};
pub use consumer_config::ConsumerConfig;
pub use workload::Workload;

pub mod prelude {
    pub use crate::{BatchSummary, Consumer, ConsumerConfig, Workload};
}
