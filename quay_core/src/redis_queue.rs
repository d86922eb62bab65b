//! Queue backend on Redis with visibility timeouts and per-delivery receipts.

use redis::{AsyncCommands, Script};
use std::sync::LazyLock;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::{
    Context, Message, QuayError, QueueClient, ReceiveRequest, Result, SendEntry, generate_id,
    validate_entries,
};

/// Milliseconds since the epoch by the server clock, shared by every client
const NOW_LUA: &str = r#"
local time = redis.call('TIME')
local now = tonumber(time[1]) * 1000 + math.floor(tonumber(time[2]) / 1000)
"#;

/// KEYS: visible set, message hash prefix
/// ARGV: visibility timeout in ms, then one fresh receipt per requested message
const RECEIVE_LUA: &str = r#"
local ids = redis.call('ZRANGEBYSCORE', KEYS[1], '-inf', now, 'LIMIT', 0, #ARGV - 1)
local hidden_until = now + tonumber(ARGV[1])
local batch = {}
for i, id in ipairs(ids) do
    local key = KEYS[2] .. id
    local body = redis.call('HGET', key, 'body')
    if body then
        local receipt = ARGV[i + 1]
        local count = redis.call('HINCRBY', key, 'receive_count', 1)
        redis.call('HSET', key, 'receipt', receipt)
        redis.call('ZADD', KEYS[1], hidden_until, id)
        table.insert(batch, {id, body, receipt, count})
    else
        redis.call('ZREM', KEYS[1], id)
    end
end
return batch
"#;

/// KEYS: visible set, message hash prefix
/// ARGV: message id and body pairs
const SEND_LUA: &str = r#"
for i = 1, #ARGV, 2 do
    local id = ARGV[i]
    redis.call('HSET', KEYS[2] .. id,
        'id', id, 'body', ARGV[i + 1], 'sent_at', now, 'receive_count', 0)
    redis.call('ZADD', KEYS[1], now, id)
end
return #ARGV / 2
"#;

/// KEYS: visible set, message hash
/// ARGV: message id, receipt
const DELETE_LUA: &str = r#"
if redis.call('HGET', KEYS[2], 'receipt') == ARGV[2] then
    redis.call('ZREM', KEYS[1], ARGV[1])
    redis.call('DEL', KEYS[2])
    return 1
end
return 0
"#;

static RECEIVE_SCRIPT: LazyLock<Script> =
    LazyLock::new(|| Script::new(&format!("{}{}", NOW_LUA, RECEIVE_LUA)));
static SEND_SCRIPT: LazyLock<Script> =
    LazyLock::new(|| Script::new(&format!("{}{}", NOW_LUA, SEND_LUA)));
static DELETE_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(DELETE_LUA));

/// `QueueClient` over a Redis sorted set scored by the time each message becomes visible
#[derive(Clone)]
pub struct RedisQueue {
    context: Context,
    poll_interval: Duration,
}

impl RedisQueue {
    pub fn with_context(context: Context) -> Self {
        Self {
            context,
            poll_interval: Duration::from_millis(100),
        }
    }

    /// How often an empty queue is re-checked while a receive call waits
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Remove every message of the queue, leased or not
    pub async fn purge(&self) -> Result<usize> {
        let mut conn = self.get_connection().await?;
        let keys = self.context.keys();

        let message_ids: Vec<String> = conn.zrange(keys.visible_set(), 0, -1).await?;

        let mut pipe = redis::pipe();
        pipe.atomic();
        for message_id in &message_ids {
            pipe.del(keys.message_hash(message_id)).ignore();
        }
        pipe.del(keys.visible_set()).ignore();
        let _: () = pipe.query_async(&mut conn).await?;

        debug!(queue = %self.context.queue(), purged = message_ids.len(), "Queue purged");
        Ok(message_ids.len())
    }

    async fn receive_visible(&self, request: &ReceiveRequest) -> Result<Vec<Message>> {
        let mut conn = self.get_connection().await?;
        let keys = self.context.keys();
        let visibility_timeout_ms = request.visibility_timeout.as_millis() as u64;

        let mut invocation = RECEIVE_SCRIPT.key(keys.visible_set());
        invocation
            .key(keys.message_hash_prefix())
            .arg(visibility_timeout_ms);
        for _ in 0..request.max_messages {
            invocation.arg(generate_id());
        }

        let rows: Vec<(String, String, String, u32)> = invocation.invoke_async(&mut conn).await?;

        Ok(rows
            .into_iter()
            .map(|(id, body, receipt, receive_count)| Message {
                id,
                body,
                receipt,
                receive_count,
            })
            .collect())
    }

    async fn get_connection(&self) -> Result<deadpool_redis::Connection> {
        self.context.get_connection().await
    }
}

impl QueueClient for RedisQueue {
    async fn receive(&self, request: ReceiveRequest) -> Result<Vec<Message>> {
        request.validate()?;
        let deadline = Instant::now() + request.wait_time;

        loop {
            let batch = self.receive_visible(&request).await?;
            let now = Instant::now();
            if !batch.is_empty() || now >= deadline {
                return Ok(batch);
            }
            sleep(self.poll_interval.min(deadline - now)).await;
        }
    }

    async fn delete(&self, message: &Message) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let keys = self.context.keys();

        let deleted: u32 = DELETE_SCRIPT
            .key(keys.visible_set())
            .key(keys.message_hash(&message.id))
            .arg(&message.id)
            .arg(&message.receipt)
            .invoke_async(&mut conn)
            .await?;

        if deleted == 0 {
            return Err(QuayError::ReceiptExpired(message.id.clone()));
        }
        Ok(())
    }

    async fn send(&self, entries: &[SendEntry]) -> Result<()> {
        validate_entries(entries)?;

        let mut conn = self.get_connection().await?;
        let keys = self.context.keys();

        let mut invocation = SEND_SCRIPT.key(keys.visible_set());
        invocation.key(keys.message_hash_prefix());
        for entry in entries {
            invocation.arg(generate_id()).arg(&entry.body);
        }
        let _: usize = invocation.invoke_async(&mut conn).await?;

        debug!(queue = %self.context.queue(), count = entries.len(), "Messages sent");
        Ok(())
    }
}
