//! Queue error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("queue capacity must be positive, got {0}")]
    InvalidCapacity(usize),

    #[error("priority queue is full (capacity {capacity}), task dropped")]
    CapacityExceeded { capacity: usize },

    #[error("priority queue is empty")]
    Empty,
}
