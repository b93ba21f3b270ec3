// kvqueue Infrastructure - Redis Adapter
// Implements: StoreClient over a Redis server (lists, sets, BLPOP, MULTI/EXEC)

mod connection;
mod redis_store;

pub use connection::open_client;
pub use redis_store::RedisStore;

// Note: redis::RedisError conversion is handled by wrapping in helper functions
// due to Rust's orphan rules (cannot implement From<redis::RedisError> for AppError here)
