//! Store selection by URL scheme

use anyhow::{Context, Result};
use kvqueue_core::error::AppError;
use kvqueue_core::port::StoreClient;
use kvqueue_infra_memory::MemoryStore;
use kvqueue_infra_redis::RedisStore;
use std::sync::Arc;
use tracing::info;

pub const MEMORY_URL: &str = "memory://";

/// Build the `StoreClient` named by `store_url`
pub async fn connect(store_url: &str) -> Result<Arc<dyn StoreClient>> {
    if store_url == MEMORY_URL {
        info!("Using in-process memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let scheme = store_url.split_once("://").map(|(scheme, _)| scheme);
    match scheme {
        Some("redis" | "rediss" | "unix" | "redis+unix") => {
            let store = RedisStore::connect(store_url)
                .await
                .with_context(|| format!("Failed to connect to {store_url}"))?;
            info!("Connected to Redis store");
            Ok(Arc::new(store))
        }
        _ => Err(AppError::Config(format!("Unsupported store URL: {store_url}")).into()),
    }
}
