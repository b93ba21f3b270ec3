// Redis StoreClient Implementation

use crate::open_client;
use async_trait::async_trait;
use kvqueue_core::error::{AppError, Result};
use kvqueue_core::port::StoreClient;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

// Helper to convert redis::RedisError to AppError with structured information
fn map_redis_error(err: RedisError) -> AppError {
    let message = if err.is_connection_refusal() {
        format!("Connection refused: {}", err)
    } else if err.is_timeout() {
        format!("Timed out: {}", err)
    } else if err.is_connection_dropped() {
        format!("Connection dropped: {}", err)
    } else if err.is_io_error() {
        format!("IO error: {}", err)
    } else {
        // Protocol, type (WRONGTYPE) and server-side errors
        format!("Command failed: {}", err)
    };

    warn!(error = %err, "Redis command failed");
    AppError::Store(message)
}

/// Parse the text reply of `INFO` into key/value pairs
///
/// Section headers (`# Server`) and blank lines are skipped.
fn parse_info(raw: &str) -> BTreeMap<String, String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub struct RedisStore {
    client: Client,
    manager: ConnectionManager,
}

impl RedisStore {
    /// Connect to `redis_url`, failing fast if the server is unreachable
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = open_client(redis_url)?;
        let manager = ConnectionManager::new(client.clone())
            .await
            .map_err(map_redis_error)?;

        debug!("Connected to Redis");
        Ok(Self { client, manager })
    }

    fn conn(&self) -> ConnectionManager {
        self.manager.clone()
    }
}

#[async_trait]
impl StoreClient for RedisStore {
    async fn llen(&self, key: &str) -> Result<u64> {
        self.conn().llen(key).await.map_err(map_redis_error)
    }

    async fn lrange(&self, key: &str, start: usize, stop: usize) -> Result<Vec<String>> {
        // Redis clamps stop to the tail; a start past isize::MAX is past any list
        let Ok(start) = isize::try_from(start) else {
            return Ok(Vec::new());
        };
        let stop = isize::try_from(stop).unwrap_or(isize::MAX);

        self.conn()
            .lrange(key, start, stop)
            .await
            .map_err(map_redis_error)
    }

    async fn rpush(&self, key: &str, value: &str) -> Result<u64> {
        self.conn().rpush(key, value).await.map_err(map_redis_error)
    }

    async fn blpop(&self, key: &str, timeout: Duration) -> Result<Option<(String, String)>> {
        // Dedicated connection: a blocked BLPOP would stall the shared one
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)?;

        conn.blpop(key, blpop_timeout_secs(timeout))
            .await
            .map_err(map_redis_error)
    }

    async fn del(&self, key: &str) -> Result<u64> {
        self.conn().del(key).await.map_err(map_redis_error)
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool> {
        let added: u64 = self.conn().sadd(key, member).await.map_err(map_redis_error)?;
        Ok(added > 0)
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        self.conn().smembers(key).await.map_err(map_redis_error)
    }

    async fn srem(&self, key: &str, member: &str) -> Result<bool> {
        let removed: u64 = self.conn().srem(key, member).await.map_err(map_redis_error)?;
        Ok(removed > 0)
    }

    async fn info(&self) -> Result<BTreeMap<String, String>> {
        let raw: String = redis::cmd("INFO")
            .query_async(&mut self.conn())
            .await
            .map_err(map_redis_error)?;

        Ok(parse_info(&raw))
    }

    async fn del_and_srem(&self, list_key: &str, set_key: &str, member: &str) -> Result<()> {
        // MULTI/EXEC: both effects become visible together
        let (): () = redis::pipe()
            .atomic()
            .del(list_key)
            .ignore()
            .srem(set_key, member)
            .ignore()
            .query_async(&mut self.conn())
            .await
            .map_err(map_redis_error)?;

        Ok(())
    }
}

/// BLPOP timeout argument; zero blocks forever, anything else waits at least 1ms
///
/// Servers before 6.2 truncate the argument to whole seconds, so a sub-millisecond
/// duration would otherwise turn into an indefinite block.
fn blpop_timeout_secs(timeout: Duration) -> f64 {
    if timeout.is_zero() {
        return 0.0;
    }
    timeout.max(Duration::from_millis(1)).as_secs_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blpop_timeout_secs() {
        assert_eq!(blpop_timeout_secs(Duration::ZERO), 0.0);
        assert_eq!(blpop_timeout_secs(Duration::from_nanos(1)), 0.001);
        assert_eq!(blpop_timeout_secs(Duration::from_micros(500)), 0.001);
        assert_eq!(blpop_timeout_secs(Duration::from_millis(250)), 0.25);
        assert_eq!(blpop_timeout_secs(Duration::from_secs(5)), 5.0);
    }

    #[test]
    fn test_parse_info_skips_headers() {
        let raw = "# Server\r\nredis_version:7.2.4\r\nredis_mode:standalone\r\n\r\n# Keyspace\r\ndb0:keys=3,expires=0,avg_ttl=0\r\n";

        let info = parse_info(raw);
        assert_eq!(info.len(), 3);
        assert_eq!(info["redis_version"], "7.2.4");
        assert_eq!(info["redis_mode"], "standalone");
        assert_eq!(info["db0"], "keys=3,expires=0,avg_ttl=0");
    }

    #[test]
    fn test_parse_info_empty_reply() {
        assert!(parse_info("").is_empty());
    }

    #[test]
    fn test_map_redis_error_is_store_error() {
        let err = RedisError::from((redis::ErrorKind::TypeError, "WRONGTYPE"));
        let mapped = map_redis_error(err);
        assert!(mapped.is_store());
        assert!(mapped.to_string().contains("WRONGTYPE"));
    }

    #[tokio::test]
    async fn test_connect_refused_is_store_error() {
        // Port 1 is reserved and never runs Redis
        let result = RedisStore::connect("redis://127.0.0.1:1").await;
        assert!(matches!(result, Err(AppError::Store(_))));
    }
}
