use crate::{QuayError, Result};
use std::fmt::Display;
use std::str::FromStr;

/// Address of one queue: the Redis server it lives on and its name,
/// written as `redis://host:port/db#queue-name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueUrl {
    redis_url: String,
    queue: String,
}

impl QueueUrl {
    pub fn new(redis_url: impl ToString, queue: impl ToString) -> Result<Self> {
        let redis_url = redis_url.to_string();
        let queue = queue.to_string();

        if !(redis_url.starts_with("redis://") || redis_url.starts_with("rediss://")) {
            return Err(QuayError::InvalidQueueUrl(format!(
                "expected a redis:// or rediss:// address, got '{}'",
                redis_url
            )));
        }
        if queue.is_empty() {
            return Err(QuayError::InvalidQueueUrl(
                "missing queue name after '#'".to_string(),
            ));
        }
        if queue.contains(['{', '}', ':']) || queue.chars().any(char::is_whitespace) {
            return Err(QuayError::InvalidQueueUrl(format!(
                "queue name '{}' may not contain braces, colons or whitespace",
                queue
            )));
        }

        Ok(Self { redis_url, queue })
    }

    /// The connection address without the queue name
    pub fn redis_url(&self) -> &str {
        &self.redis_url
    }

    /// The queue name
    pub fn queue(&self) -> &str {
        &self.queue
    }
}

impl FromStr for QueueUrl {
    type Err = QuayError;

    fn from_str(s: &str) -> Result<Self> {
        let Some((redis_url, queue)) = s.trim().rsplit_once('#') else {
            return Err(QuayError::InvalidQueueUrl(format!(
                "'{}' has no '#queue-name' suffix",
                s
            )));
        };
        Self::new(redis_url, queue)
    }
}

impl Display for QueueUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.redis_url, self.queue)
    }
}
