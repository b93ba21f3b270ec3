// Domain Layer - Queue names, store keys and message shapes

pub mod error;
pub mod message;
pub mod queue;

// Re-exports
pub use error::DomainError;
pub use message::{Message, PeekRange, PoppedMessage};
pub use queue::{QueueName, QUEUE_KEY_PREFIX, REGISTRY_KEY};
