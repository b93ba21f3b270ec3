// Queue Domain Model

use super::error::{DomainError, Result};
use std::fmt;

/// Prefix of the list key holding a queue's messages (`queue:<name>`)
pub const QUEUE_KEY_PREFIX: &str = "queue:";

/// Key of the set registering every known queue name
pub const REGISTRY_KEY: &str = "queues";

/// Validated queue name
///
/// The name is stored verbatim; only the empty name is rejected, since it
/// would collide with the bare `queue:` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueueName(String);

impl QueueName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::InvalidQueueName(
                "queue name must not be empty".to_string(),
            ));
        }
        Ok(Self(name))
    }

    /// Recover a queue name from its list key, e.g. `queue:emails` -> `emails`
    pub fn from_list_key(key: &str) -> Result<Self> {
        match key.strip_prefix(QUEUE_KEY_PREFIX) {
            Some(name) => Self::new(name),
            None => Err(DomainError::InvalidQueueName(format!(
                "key {key:?} is not a queue list key"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the list backing this queue
    pub fn list_key(&self) -> String {
        format!("{}{}", QUEUE_KEY_PREFIX, self.0)
    }
}

impl fmt::Display for QueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QueueName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for QueueName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for QueueName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}
