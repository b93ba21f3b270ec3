// Store Client Port (Interface)

use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

/// List and set primitives of a Redis-like key-value store
///
/// Every method is one store round trip and is atomic at the store.
/// Implementations map their client errors to `AppError::Store`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Length of the list at `key` (0 when the key does not exist)
    async fn llen(&self, key: &str) -> Result<u64>;

    /// Elements `start..=stop` of the list at `key`
    async fn lrange(&self, key: &str, start: usize, stop: usize) -> Result<Vec<String>>;

    /// Append `value` to the tail of the list at `key`, returning the new length
    async fn rpush(&self, key: &str, value: &str) -> Result<u64>;

    /// Remove the head of the list at `key`, waiting up to `timeout`
    ///
    /// A zero timeout waits indefinitely. Returns `(key, value)` of the
    /// popped element, or `None` once the timeout expires.
    async fn blpop(&self, key: &str, timeout: Duration) -> Result<Option<(String, String)>>;

    /// Delete `key`, returning the number of keys removed
    async fn del(&self, key: &str) -> Result<u64>;

    /// Add `member` to the set at `key`; false if it was already present
    async fn sadd(&self, key: &str, member: &str) -> Result<bool>;

    /// All members of the set at `key`, unordered
    async fn smembers(&self, key: &str) -> Result<Vec<String>>;

    /// Remove `member` from the set at `key`; false if it was absent
    async fn srem(&self, key: &str, member: &str) -> Result<bool>;

    /// Server information as flat key/value pairs
    async fn info(&self) -> Result<BTreeMap<String, String>>;

    /// Delete `list_key` and remove `member` from `set_key`
    ///
    /// The default issues two separate calls, so observers may see one effect
    /// without the other. Stores with transactions should override this.
    async fn del_and_srem(&self, list_key: &str, set_key: &str, member: &str) -> Result<()> {
        self.del(list_key).await?;
        self.srem(set_key, member).await?;
        Ok(())
    }
}
