// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid queue name: {0}")]
    InvalidQueueName(String),

    #[error("Invalid peek range: {0}")]
    InvalidPeekRange(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
