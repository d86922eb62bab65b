/// Return for Quay operations that can succeed (OK) or fail (Err)
pub type Result<T> = std::result::Result<T, QuayError>;

/// All the possible errors from Quay operations
#[derive(Debug)]
pub enum QuayError {
    Redis(redis::RedisError),
    Pool(deadpool_redis::PoolError),
    PoolCreation(deadpool_redis::CreatePoolError),
    MissingEnvVar(&'static str),
    InvalidQueueUrl(String), // message with details what is invalid
    InvalidBatch(String),    // message with details what is invalid
    ReceiptExpired(String),  // message id
    CorruptMessage(String),  // message with details what is missing
    Workload(String),        // message from the failing workload
    TooManyErrors(usize),    // the number of errors
}

impl QuayError {
    /// Errors that can only happen while wiring up a process, never while running it
    pub fn is_startup(&self) -> bool {
        use QuayError::*;
        matches!(self, MissingEnvVar(_) | InvalidQueueUrl(_) | PoolCreation(_))
    }
}

impl From<redis::RedisError> for QuayError {
    fn from(err: redis::RedisError) -> Self {
        QuayError::Redis(err)
    }
}

impl From<deadpool_redis::PoolError> for QuayError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        QuayError::Pool(err)
    }
}

impl From<deadpool_redis::CreatePoolError> for QuayError {
    fn from(err: deadpool_redis::CreatePoolError) -> Self {
        QuayError::PoolCreation(err)
    }
}

impl std::fmt::Display for QuayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use QuayError::*;
        match self {
            Redis(err) => write!(f, "Redis error: {}", err),
            Pool(err) => write!(f, "Connection pool error: {}", err),
            PoolCreation(err) => write!(f, "Failed to create connection pool: {}", err),
            MissingEnvVar(var) => write!(f, "Missing environment variable: {}", var),
            InvalidQueueUrl(msg) => write!(f, "Invalid queue URL: {}", msg),
            InvalidBatch(msg) => write!(f, "Invalid batch: {}", msg),
            ReceiptExpired(id) => write!(f, "Receipt expired for message: {}", id),
            CorruptMessage(msg) => write!(f, "Corrupt message: {}", msg),
            Workload(msg) => write!(f, "Workload failed: {}", msg),
            TooManyErrors(count) => write!(f, "Too many consecutive errors: {}", count),
        }
    }
}

impl std::error::Error for QuayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use QuayError::*;
        match self {
            Redis(err) => Some(err),
            Pool(err) => Some(err),
            PoolCreation(err) => Some(err),
            MissingEnvVar(_) => None,
            InvalidQueueUrl(_) => None,
            InvalidBatch(_) => None,
            ReceiptExpired(_) => None,
            CorruptMessage(_) => None,
            Workload(_) => None,
            TooManyErrors(_) => None,
        }
    }
}
