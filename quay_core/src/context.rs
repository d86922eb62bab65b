use crate::{Forum, Keys, QueueUrl, Result, get_queue_url};

/// Queue-specific context for Quay operations
#[derive(Clone)]
pub struct Context {
    forum: Forum,
    queue: String,
    keys: Keys,
}

impl Context {
    /// Create a new context with the given forum and queue
    pub fn new(forum: Forum, queue: impl ToString) -> Self {
        Self {
            forum,
            queue: queue.to_string(),
            keys: Keys::with_queue(queue),
        }
    }

    /// Resolve the queue from `QUEUE_URL`; fails when it is unset or malformed
    pub fn try_from_env() -> Result<Self> {
        let url: QueueUrl = get_queue_url()?.parse()?;
        Self::try_from_url(&url)
    }

    pub fn try_from_url(url: &QueueUrl) -> Result<Self> {
        let forum = Forum::try_from(url)?;
        Ok(Self::new(forum, url.queue()))
    }

    /// Get a Redis connection from the forum
    pub async fn get_connection(&self) -> Result<deadpool_redis::Connection> {
        Ok(self.forum.redis_pool().get().await?)
    }

    /// Get the queue name
    pub fn queue(&self) -> &str {
        &self.queue
    }

    /// Get the Redis keys for this queue
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Get the forum for this context
    pub fn forum(&self) -> &Forum {
        &self.forum
    }

    /// Create a new context for a different queue using the same forum
    pub fn clone_for_queue(&self, queue: impl ToString) -> Self {
        Self::new(self.forum.clone(), queue)
    }
}
