// Queue Driver Port (Interface)

use crate::domain::{Message, PeekRange, PoppedMessage, QueueName};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

/// Backend-agnostic queue driver consumed by producers and consumers
#[async_trait]
pub trait Driver: Send + Sync {
    /// Number of messages waiting in `queue` (0 if the queue does not exist)
    async fn count_messages(&self, queue: &QueueName) -> Result<u64>;

    /// Names of every registered queue, unordered
    async fn list_queues(&self) -> Result<Vec<QueueName>>;

    /// Register `queue` (idempotent)
    async fn create_queue(&self, queue: &QueueName) -> Result<()>;

    /// Delete the messages of `queue` and unregister it
    async fn remove_queue(&self, queue: &QueueName) -> Result<()>;

    /// Append `message` to the tail of `queue`
    ///
    /// Does not register the queue; call `create_queue` for that.
    async fn push_message(&self, queue: &QueueName, message: &str) -> Result<()>;

    /// Remove the head of `queue`, waiting up to `timeout` (zero waits forever)
    ///
    /// An expired timeout is `Ok(None)`, not an error.
    async fn pop_message(&self, queue: &QueueName, timeout: Duration)
        -> Result<Option<PoppedMessage>>;

    /// Confirm a popped message was handled
    async fn acknowledge_message(&self, queue: &QueueName, receipt: &str) -> Result<()>;

    /// Read messages of `queue` without removing them
    async fn peek_queue(&self, queue: &QueueName, range: PeekRange) -> Result<Vec<Message>>;

    /// Backend information
    async fn info(&self) -> Result<BTreeMap<String, String>>;
}
