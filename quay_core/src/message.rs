use crate::{QuayError, Result};
use std::collections::HashSet;
use std::time::Duration;

/// Most messages a single receive call may ask for
pub const MAX_RECEIVE_BATCH: usize = 10;

/// Most entries a single send call may carry
pub const MAX_SEND_BATCH: usize = 10;

/// A message as handed out by a receive call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Queue-assigned ULID of the message, stable across redeliveries
    pub id: String,

    /// The opaque message payload
    pub body: String,

    /// Lease token of this particular delivery; needed to delete the message
    pub receipt: String,

    /// How many times the message has been delivered, this delivery included
    pub receive_count: u32,
}

/// One entry of a send call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendEntry {
    /// Caller-chosen identifier, only unique within the same send call
    pub id: String,

    /// The opaque message payload
    pub body: String,
}

impl SendEntry {
    pub fn new(id: impl ToString, body: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            body: body.to_string(),
        }
    }
}

/// Parameters of a single receive call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveRequest {
    /// Upper bound of messages returned; 1 to `MAX_RECEIVE_BATCH`
    pub max_messages: usize,

    /// How long to wait for at least one message before returning empty-handed
    pub wait_time: Duration,

    /// How long the received messages stay hidden from other receivers
    pub visibility_timeout: Duration,
}

impl ReceiveRequest {
    pub fn validate(&self) -> Result<()> {
        if self.max_messages == 0 || self.max_messages > MAX_RECEIVE_BATCH {
            return Err(QuayError::InvalidBatch(format!(
                "can receive 1 to {} messages at once, asked for {}",
                MAX_RECEIVE_BATCH, self.max_messages
            )));
        }
        Ok(())
    }
}

/// Check that a send call is non-empty, small enough and has no duplicate entry ids
pub fn validate_entries(entries: &[SendEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(QuayError::InvalidBatch("no entries to send".to_string()));
    }
    if entries.len() > MAX_SEND_BATCH {
        return Err(QuayError::InvalidBatch(format!(
            "can send at most {} entries at once, got {}",
            MAX_SEND_BATCH,
            entries.len()
        )));
    }
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.id.as_str()) {
            return Err(QuayError::InvalidBatch(format!(
                "duplicate entry id '{}'",
                entry.id
            )));
        }
    }
    Ok(())
}
