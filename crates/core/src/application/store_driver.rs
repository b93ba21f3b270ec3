// Queue Store Driver - translates queue operations into list/set primitives
//
// Key layout (shared with every other driver writing to the same store):
//   queue:<name>  LIST of messages, head = oldest
//   queues        SET of registered queue names

use crate::domain::{Message, PeekRange, PoppedMessage, QueueName, REGISTRY_KEY};
use crate::error::Result;
use crate::port::{Driver, StoreClient};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Driver backed by any Redis-like `StoreClient`
///
/// Holds no state of its own; errors from the store are passed through.
#[derive(Clone)]
pub struct StoreDriver {
    store: Arc<dyn StoreClient>,
}

impl StoreDriver {
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn StoreClient> {
        &self.store
    }
}

#[async_trait]
impl Driver for StoreDriver {
    async fn count_messages(&self, queue: &QueueName) -> Result<u64> {
        let count = self.store.llen(&queue.list_key()).await?;
        debug!(queue = %queue, count, "Counted messages");
        Ok(count)
    }

    async fn list_queues(&self) -> Result<Vec<QueueName>> {
        let members = self.store.smembers(REGISTRY_KEY).await?;

        let queues = members
            .into_iter()
            .filter_map(|member| match QueueName::new(member) {
                Ok(name) => Some(name),
                Err(e) => {
                    warn!(error = %e, "Skipping invalid registry member");
                    None
                }
            })
            .collect();

        Ok(queues)
    }

    async fn create_queue(&self, queue: &QueueName) -> Result<()> {
        let added = self.store.sadd(REGISTRY_KEY, queue.as_str()).await?;
        debug!(queue = %queue, added, "Registered queue");
        Ok(())
    }

    async fn remove_queue(&self, queue: &QueueName) -> Result<()> {
        self.store
            .del_and_srem(&queue.list_key(), REGISTRY_KEY, queue.as_str())
            .await?;
        debug!(queue = %queue, "Removed queue");
        Ok(())
    }

    async fn push_message(&self, queue: &QueueName, message: &str) -> Result<()> {
        let len = self.store.rpush(&queue.list_key(), message).await?;
        debug!(queue = %queue, len, "Pushed message");
        Ok(())
    }

    async fn pop_message(
        &self,
        queue: &QueueName,
        timeout: Duration,
    ) -> Result<Option<PoppedMessage>> {
        let Some((key, message)) = self.store.blpop(&queue.list_key(), timeout).await? else {
            debug!(queue = %queue, timeout = ?timeout, "Pop timed out");
            return Ok(None);
        };

        // Single-key pop: the reply key can only be ours, fall back if it is unparseable
        let source = QueueName::from_list_key(&key).unwrap_or_else(|_| queue.clone());

        Ok(Some(PoppedMessage {
            message,
            queue: source,
        }))
    }

    async fn acknowledge_message(&self, queue: &QueueName, _receipt: &str) -> Result<()> {
        // The blocking pop already removed the message from the list
        debug!(queue = %queue, "Acknowledged message");
        Ok(())
    }

    async fn peek_queue(&self, queue: &QueueName, range: PeekRange) -> Result<Vec<Message>> {
        let (start, stop) = range.bounds();
        self.store.lrange(&queue.list_key(), start, stop).await
    }

    async fn info(&self) -> Result<BTreeMap<String, String>> {
        self.store.info().await
    }
}
