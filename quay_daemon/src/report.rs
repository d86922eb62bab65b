use quay::core::{Inspector, MessageRecord, QueueCounts, Result};
use serde::Serialize;

/// Snapshot of a queue as printed by `quay-inspect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueReport {
    pub queue: String,
    pub counts: QueueCounts,
    /// Server clock at the time of the snapshot, to compare `visible_at` against
    pub server_time_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageRecord>,
}

impl QueueReport {
    /// Read the counts and optionally one message from the queue the inspector looks at
    pub async fn gather(
        inspector: &Inspector,
        queue: &str,
        message_id: Option<&str>,
    ) -> Result<Self> {
        let counts = inspector.counts().await?;
        let server_time_ms = inspector.server_time_ms().await?;
        let message = match message_id {
            Some(id) => inspector.get_message(id).await?,
            None => None,
        };

        Ok(Self {
            queue: queue.to_string(),
            counts,
            server_time_ms,
            message,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
