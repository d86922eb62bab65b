/// Redis key generator for Quay components
#[derive(Debug, Clone)]
pub struct Keys {
    prefix: String,
    queue: String,
}

impl Keys {
    /// Create a new Redis key generator with the default "quay" prefix and over given queue
    pub fn with_queue(queue: impl ToString) -> Self {
        Self {
            prefix: "quay".to_string(),
            queue: queue.to_string(),
        }
    }

    /// Redis key for the hash that holds the message body and delivery bookkeeping
    pub fn message_hash(&self, message_id: &str) -> String {
        format!("{}{}", self.message_hash_prefix(), message_id)
    }

    /// Everything before the message id in `message_hash`; handed to Lua scripts
    pub fn message_hash_prefix(&self) -> String {
        format!("{}:{{{}}}:message:", self.prefix, self.queue)
    }

    /// Redis key for the sorted set that holds every live message
    /// with the timestamp it (next) becomes visible as score
    pub fn visible_set(&self) -> String {
        format!("{}:{{{}}}:visible", self.prefix, self.queue)
    }
}
