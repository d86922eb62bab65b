//! Provides functionality to query the state of messages in a Quay queue.

use redis::{AsyncCommands, Script};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::{Context, QuayError, Result};

/// KEYS: visible set
/// Splits the set at the server's current millisecond
static COUNTS_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
local time = redis.call('TIME')
local now = tonumber(time[1]) * 1000 + math.floor(tonumber(time[2]) / 1000)
local visible = redis.call('ZCOUNT', KEYS[1], '-inf', now)
local in_flight = redis.call('ZCOUNT', KEYS[1], '(' .. now, '+inf')
return {visible, in_flight}
"#,
    )
});

/// Interface for querying queue and message details
pub struct Inspector {
    context: Context,
}

impl Inspector {
    pub fn with_context(context: Context) -> Self {
        Self { context }
    }

    /// How many messages are waiting to be received and how many are leased right now
    pub async fn counts(&self) -> Result<QueueCounts> {
        let mut conn = self.context.get_connection().await?;
        let keys = self.context.keys();

        let (visible, in_flight): (usize, usize) = COUNTS_SCRIPT
            .key(keys.visible_set())
            .invoke_async(&mut conn)
            .await?;

        Ok(QueueCounts { visible, in_flight })
    }

    /// The Redis server clock in milliseconds, which all visibility timestamps follow
    pub async fn server_time_ms(&self) -> Result<i64> {
        let mut conn = self.context.get_connection().await?;

        let (seconds, micros): (i64, i64) = redis::cmd("TIME").query_async(&mut conn).await?;

        Ok(seconds * 1000 + micros / 1000)
    }

    pub async fn message_exists(&self, message_id: &str) -> Result<bool> {
        let mut conn = self.context.get_connection().await?;
        let keys = self.context.keys();

        let exists: bool = conn.exists(keys.message_hash(message_id)).await?;

        Ok(exists)
    }

    /// Look up a message without leasing it; `None` once it has been deleted
    pub async fn get_message(&self, message_id: &str) -> Result<Option<MessageRecord>> {
        let mut conn = self.context.get_connection().await?;
        let keys = self.context.keys();

        let (hash, score): (HashMap<String, String>, Option<f64>) = redis::pipe()
            .hgetall(keys.message_hash(message_id))
            .zscore(keys.visible_set(), message_id)
            .query_async(&mut conn)
            .await?;

        if hash.is_empty() {
            return Ok(None);
        }
        let visible_at = score.map(|ms| ms as i64);
        MessageRecord::from_hash(hash, visible_at).map(Some)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueCounts {
    /// Messages that the next receive call could get
    pub visible: usize,
    /// Messages received but neither deleted nor timed out yet
    pub in_flight: usize,
}

/// Everything stored about a single message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    pub id: String,
    pub body: String,
    /// UNIX timestamp in milliseconds of the send call
    pub sent_at: i64,
    /// Deliveries so far
    pub receive_count: u32,
    /// UNIX timestamp in milliseconds when the message can be received (again)
    pub visible_at: Option<i64>,
}

impl MessageRecord {
    /// Convert a Redis hash into a more structured record
    pub fn from_hash(hash: HashMap<String, String>, visible_at: Option<i64>) -> Result<Self> {
        let id = hash
            .get("id")
            .ok_or_else(|| QuayError::CorruptMessage("Missing id field".to_string()))?
            .clone();

        let body = hash
            .get("body")
            .ok_or_else(|| QuayError::CorruptMessage("Missing body field".to_string()))?
            .clone();

        let sent_at = hash
            .get("sent_at")
            .ok_or_else(|| QuayError::CorruptMessage("Missing sent_at field".to_string()))?
            .parse::<i64>()
            .map_err(|_| QuayError::CorruptMessage("Invalid sent_at".to_string()))?;

        let receive_count = hash
            .get("receive_count")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(0);

        Ok(Self {
            id,
            body,
            sent_at,
            receive_count,
            visible_at,
        })
    }
}
