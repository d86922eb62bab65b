use crate::{Message, ReceiveRequest, Result, SendEntry};
use std::future::Future;
use std::sync::Arc;

/// The narrow interface producers and consumers use to talk to a queue.
///
/// Implementations provide at-least-once delivery: a received message stays
/// hidden for the requested visibility timeout and is handed out again unless
/// it is deleted with the receipt of its latest delivery before then.
pub trait QueueClient: Send + Sync {
    /// Lease up to `request.max_messages` visible messages, waiting up to
    /// `request.wait_time` for the first one; an empty batch is not an error.
    fn receive(
        &self,
        request: ReceiveRequest,
    ) -> impl Future<Output = Result<Vec<Message>>> + Send;

    /// Acknowledge a message for good; fails with `ReceiptExpired` when the
    /// message has been redelivered or deleted since this receipt was issued.
    fn delete(&self, message: &Message) -> impl Future<Output = Result<()>> + Send;

    /// Enqueue a batch of new messages, visible immediately.
    fn send(&self, entries: &[SendEntry]) -> impl Future<Output = Result<()>> + Send;
}

impl<Q: QueueClient> QueueClient for Arc<Q> {
    fn receive(
        &self,
        request: ReceiveRequest,
    ) -> impl Future<Output = Result<Vec<Message>>> + Send {
        (**self).receive(request)
    }

    fn delete(&self, message: &Message) -> impl Future<Output = Result<()>> + Send {
        (**self).delete(message)
    }

    fn send(&self, entries: &[SendEntry]) -> impl Future<Output = Result<()>> + Send {
        (**self).send(entries)
    }
}
