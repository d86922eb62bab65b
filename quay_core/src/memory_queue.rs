//! In-process queue with the same lease and receipt rules as the Redis backend.

use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::time::{Instant, timeout};

use crate::{
    Message, QuayError, QueueClient, QueueCounts, ReceiveRequest, Result, SendEntry, generate_id,
    validate_entries,
};

/// Upper bound of a single wait slice while long-polling an empty queue,
/// so that expiring leases are noticed without a send.
const RECHECK_INTERVAL: Duration = Duration::from_millis(10);

struct StoredMessage {
    id: String,
    body: String,
    visible_at: Instant,
    receipt: Option<String>,
    receive_count: u32,
}

/// `QueueClient` that keeps every message in memory, for tests and local runs
#[derive(Default)]
pub struct MemoryQueue {
    // Send order; receive scans from the front.
    messages: Mutex<Vec<StoredMessage>>,
    sent: Notify,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn counts(&self) -> QueueCounts {
        let messages = self.messages.lock().await;
        let now = Instant::now();
        let visible = messages.iter().filter(|m| m.visible_at <= now).count();
        QueueCounts {
            visible,
            in_flight: messages.len() - visible,
        }
    }

    /// Bodies of every message still in the queue, in send order
    pub async fn bodies(&self) -> Vec<String> {
        let messages = self.messages.lock().await;
        messages.iter().map(|m| m.body.clone()).collect()
    }

    async fn receive_visible(&self, request: &ReceiveRequest) -> Vec<Message> {
        let mut messages = self.messages.lock().await;
        let now = Instant::now();
        let hidden_until = now + request.visibility_timeout;

        messages
            .iter_mut()
            .filter(|m| m.visible_at <= now)
            .take(request.max_messages)
            .map(|stored| {
                let receipt = generate_id();
                stored.visible_at = hidden_until;
                stored.receipt = Some(receipt.clone());
                stored.receive_count += 1;
                Message {
                    id: stored.id.clone(),
                    body: stored.body.clone(),
                    receipt,
                    receive_count: stored.receive_count,
                }
            })
            .collect()
    }
}

impl QueueClient for MemoryQueue {
    async fn receive(&self, request: ReceiveRequest) -> Result<Vec<Message>> {
        request.validate()?;
        let deadline = Instant::now() + request.wait_time;

        loop {
            let batch = self.receive_visible(&request).await;
            let now = Instant::now();
            if !batch.is_empty() || now >= deadline {
                return Ok(batch);
            }
            let _ = timeout(RECHECK_INTERVAL.min(deadline - now), self.sent.notified()).await;
        }
    }

    async fn delete(&self, message: &Message) -> Result<()> {
        let mut messages = self.messages.lock().await;
        let position = messages.iter().position(|m| {
            m.id == message.id && m.receipt.as_deref() == Some(message.receipt.as_str())
        });

        match position {
            Some(index) => {
                messages.remove(index);
                Ok(())
            }
            None => Err(QuayError::ReceiptExpired(message.id.clone())),
        }
    }

    async fn send(&self, entries: &[SendEntry]) -> Result<()> {
        validate_entries(entries)?;

        let now = Instant::now();
        let mut messages = self.messages.lock().await;
        messages.extend(entries.iter().map(|entry| StoredMessage {
            id: generate_id(),
            body: entry.body.clone(),
            visible_at: now,
            receipt: None,
            receive_count: 0,
        }));
        drop(messages);

        self.sent.notify_waiters();
        Ok(())
    }
}
