//! Thread-safe handle around a [`PriorityQueue`].
//!
//! Insert and extract both move `size` and shuffle slots, so the whole queue
//! sits behind one lock taken once per operation.

use std::sync::Arc;

use parking_lot::Mutex;
use taskheap_core::Task;

use crate::error::QueueError;
use crate::heap::PriorityQueue;

/// Cloneable, lock-guarded priority queue shared between threads.
#[derive(Debug, Clone)]
pub struct SharedQueue {
    inner: Arc<Mutex<PriorityQueue>>,
    capacity: usize,
}

impl SharedQueue {
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        Ok(Self::from(PriorityQueue::new(capacity)?))
    }

    pub fn insert(&self, priority: i32, description: &str) -> Result<(), QueueError> {
        self.inner.lock().insert(priority, description)
    }

    pub fn push(&self, task: Task) -> Result<(), QueueError> {
        self.inner.lock().push(task)
    }

    pub fn extract_min(&self) -> Result<Task, QueueError> {
        self.inner.lock().extract_min()
    }

    /// Snapshot of the current size; may be stale as soon as it returns.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Fixed at construction, so no lock is taken.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Run `f` with exclusive access, for multi-step reads that must see one state.
    pub fn with_queue<R>(&self, f: impl FnOnce(&mut PriorityQueue) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<PriorityQueue> for SharedQueue {
    fn from(queue: PriorityQueue) -> Self {
        Self {
            capacity: queue.capacity(),
            inner: Arc::new(Mutex::new(queue)),
        }
    }
}
