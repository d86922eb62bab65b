//! `quay_core` provides shared utilities for the Quay queue system.
//!
//! This crate includes the `QueueClient` interface with its Redis and
//! in-memory implementations, queue addressing, Redis key management,
//! shutdown coordination, throughput windows and error types.

mod context;
mod error;
mod forum;
mod inspector;
mod keys;
mod memory_queue;
mod message;
mod queue_client;
mod queue_url;
mod redis_queue;
mod shutdown;
mod throughput;
mod util;

pub use context::Context;
pub use error::{QuayError, Result};
pub use forum::Forum;
pub use inspector::{Inspector, MessageRecord, QueueCounts};
pub use keys::Keys;
pub use memory_queue::MemoryQueue;
pub use message::{
    MAX_RECEIVE_BATCH, MAX_SEND_BATCH, Message, ReceiveRequest, SendEntry, validate_entries,
};
pub use queue_client::QueueClient;
pub use queue_url::QueueUrl;
pub use redis_queue::RedisQueue;
pub use shutdown::Shutdown;
pub use throughput::{ThroughputWindow, WindowReport};
pub use util::{QUEUE_URL_VAR, generate_id, get_queue_url};

pub mod prelude {
    pub use crate::{
        Context, Forum, Inspector, MemoryQueue, Message, QuayError, QueueClient, QueueUrl,
        ReceiveRequest, RedisQueue, SendEntry, Shutdown,
    };
}
