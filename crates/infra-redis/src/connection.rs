// Redis Client Setup

use kvqueue_core::error::{AppError, Result};
use redis::Client;

/// Open a Redis client for `redis_url` (`redis://`, `rediss://` or `unix://`)
///
/// No connection is made yet; this only validates the URL.
pub fn open_client(redis_url: &str) -> Result<Client> {
    Client::open(redis_url)
        .map_err(|e| AppError::Config(format!("Invalid Redis URL {redis_url:?}: {e}")))
}
