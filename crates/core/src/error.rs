// Central Error Type for the Driver

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for failures reported by the backing store (connectivity, protocol)
    pub fn is_store(&self) -> bool {
        matches!(self, AppError::Store(_))
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: redis::RedisError conversion is handled in the infra-redis crate
// by converting to AppError::Store(String)

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_domain_error_converts() {
        let err: AppError = DomainError::InvalidQueueName("empty".to_string()).into();
        assert!(matches!(err, AppError::Domain(_)));
        assert!(!err.is_store());
        assert_eq!(err.to_string(), "Domain error: Invalid queue name: empty");
    }
}
