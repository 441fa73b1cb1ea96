//! Array-backed binary min-heap of [`Task`]s.
//!
//! Node `i` has children `2i + 1` and `2i + 2`. Every node's priority is
//! `<=` both children's, so the root always holds the minimum. The backing
//! `Vec` is allocated once at construction and its length is the queue size;
//! it never grows past the configured capacity.

use taskheap_core::config::QueueConfig;
use taskheap_core::task::DEFAULT_DESCRIPTION_MAX_BYTES;
use taskheap_core::Task;
use tracing::{debug, warn};

use crate::error::QueueError;

/// Fixed-capacity min-priority queue.
#[derive(Debug, Clone)]
pub struct PriorityQueue {
    tasks: Vec<Task>,
    capacity: usize,
    description_max_bytes: usize,
}

impl PriorityQueue {
    /// Create an empty queue holding at most `capacity` tasks.
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        Self::with_description_limit(capacity, DEFAULT_DESCRIPTION_MAX_BYTES)
    }

    /// Create an empty queue from loaded configuration.
    pub fn from_config(config: &QueueConfig) -> Result<Self, QueueError> {
        Self::with_description_limit(config.capacity, config.description_max_bytes)
    }

    /// Create an empty queue whose inserted descriptions are cut to `max_bytes`.
    pub fn with_description_limit(capacity: usize, max_bytes: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::InvalidCapacity(capacity));
        }
        debug!(capacity, description_max_bytes = max_bytes, "priority queue created");
        Ok(Self {
            tasks: Vec::with_capacity(capacity),
            capacity,
            description_max_bytes: max_bytes,
        })
    }

    /// Insert a task built from `priority` and `description`.
    ///
    /// Over-long descriptions are truncated. On a full queue the task is
    /// dropped, the queue is left untouched and `CapacityExceeded` is returned.
    pub fn insert(&mut self, priority: i32, description: &str) -> Result<(), QueueError> {
        let task = Task::with_limit(priority, description, self.description_max_bytes);
        self.push(task)
    }

    /// Insert an already-built task. Same full-queue behavior as [`insert`](Self::insert).
    pub fn push(&mut self, task: Task) -> Result<(), QueueError> {
        if self.is_full() {
            warn!(
                capacity = self.capacity,
                priority = task.priority(),
                "priority queue is full, cannot insert task"
            );
            return Err(QueueError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.tasks.push(task);
        self.sift_up(self.tasks.len() - 1);
        Ok(())
    }

    /// Remove and return the task with the lowest priority.
    ///
    /// Returns `QueueError::Empty` when there is nothing to extract; a task
    /// whose priority happens to be `-1` is returned like any other.
    pub fn extract_min(&mut self) -> Result<Task, QueueError> {
        if self.tasks.is_empty() {
            debug!("extract_min on empty queue");
            return Err(QueueError::Empty);
        }
        // Move the last element into the root slot, then restore order below it.
        let min = self.tasks.swap_remove(0);
        if !self.tasks.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    /// Extract every task in non-decreasing priority order, emptying the queue.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_> {
        DrainSorted { queue: self }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tasks.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn description_max_bytes(&self) -> usize {
        self.description_max_bytes
    }

    /// The live tasks in heap (not sorted) order.
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Whether every parent's priority is `<=` its children's.
    pub fn is_heap(&self) -> bool {
        (1..self.tasks.len())
            .all(|i| self.tasks[parent(i)].priority() <= self.tasks[i].priority())
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let p = parent(idx);
            if self.tasks[idx].priority() >= self.tasks[p].priority() {
                break;
            }
            self.tasks.swap(idx, p);
            idx = p;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let size = self.tasks.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;

            if left < size && self.tasks[left].priority() < self.tasks[smallest].priority() {
                smallest = left;
            }
            if right < size && self.tasks[right].priority() < self.tasks[smallest].priority() {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.tasks.swap(idx, smallest);
            idx = smallest;
        }
    }
}

fn parent(idx: usize) -> usize {
    (idx - 1) / 2
}

/// Iterator returned by [`PriorityQueue::drain_sorted`].
///
/// Tasks not consumed before the iterator is dropped stay in the queue.
#[derive(Debug)]
pub struct DrainSorted<'a> {
    queue: &'a mut PriorityQueue,
}

impl Iterator for DrainSorted<'_> {
    type Item = Task;

    fn next(&mut self) -> Option<Task> {
        self.queue.extract_min().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for DrainSorted<'_> {}
