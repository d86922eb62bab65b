use crate::{QuayError, Result};
use ulid::Ulid;

/// Name of the single required setting of every Quay process
pub const QUEUE_URL_VAR: &str = "QUEUE_URL";

/// Generate a new ULID for a message or a receipt
pub fn generate_id() -> String {
    Ulid::new().to_string()
}

/// A standardized way to read the QUEUE_URL env var, which has no fallback
pub fn get_queue_url() -> Result<String> {
    std::env::var(QUEUE_URL_VAR)
        .ok()
        .filter(|url| !url.trim().is_empty())
        .ok_or(QuayError::MissingEnvVar(QUEUE_URL_VAR))
}
