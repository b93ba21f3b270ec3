// Message Domain Model

use super::error::{DomainError, Result};
use super::queue::QueueName;

/// Opaque message payload; the driver imposes no structure on it
pub type Message = String;

/// Default number of messages returned by a peek
pub const DEFAULT_PEEK_LIMIT: usize = 20;

/// A message removed from the head of a queue by a blocking pop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoppedMessage {
    pub message: Message,
    /// Queue the message was actually popped from
    pub queue: QueueName,
}

/// Window of a non-destructive read: `limit` messages starting at `offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeekRange {
    offset: usize,
    limit: usize,
}

impl PeekRange {
    pub fn new(offset: usize, limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(DomainError::InvalidPeekRange(
                "limit must be positive".to_string(),
            ));
        }
        if offset.checked_add(limit).is_none() {
            return Err(DomainError::InvalidPeekRange(format!(
                "offset {offset} + limit {limit} overflows"
            )));
        }
        Ok(Self { offset, limit })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Inclusive `(start, stop)` list indices covered by this range
    pub fn bounds(&self) -> (usize, usize) {
        (self.offset, self.offset + self.limit - 1)
    }
}

impl Default for PeekRange {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PEEK_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range() {
        let range = PeekRange::default();
        assert_eq!(range.offset(), 0);
        assert_eq!(range.limit(), 20);
        assert_eq!(range.bounds(), (0, 19));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = PeekRange::new(10, 10).unwrap();
        assert_eq!(range.bounds(), (10, 19));

        let single = PeekRange::new(3, 1).unwrap();
        assert_eq!(single.bounds(), (3, 3));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = PeekRange::new(0, 0).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_overflowing_range_rejected() {
        assert!(PeekRange::new(usize::MAX, 2).is_err());
    }
}
