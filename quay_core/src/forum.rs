use crate::{Context, QueueUrl, Result};
use deadpool_redis::{Config, Pool, Runtime};

/// Central Redis connection pool that manages access to all queues on one server
#[derive(Clone)]
pub struct Forum {
    redis_pool: Pool,
}

impl Forum {
    /// Create a new forum with the specified Redis URL
    pub fn new(redis_url: &str) -> Result<Self> {
        let redis_pool = Config::from_url(redis_url).create_pool(Some(Runtime::Tokio1))?;
        Ok(Self { redis_pool })
    }

    /// Create a context for a specific queue
    pub fn queue(&self, queue: &str) -> Context {
        Context::new(self.clone(), queue)
    }

    /// Get a reference to the underlying Redis connection pool
    pub(crate) fn redis_pool(&self) -> &Pool {
        &self.redis_pool
    }
}

impl TryFrom<&QueueUrl> for Forum {
    type Error = crate::QuayError;

    fn try_from(url: &QueueUrl) -> Result<Self> {
        Self::new(url.redis_url())
    }
}
