use std::fmt;

use serde::{Deserialize, Serialize};

/// Default byte bound for a task description (a 100-byte buffer minus its terminator).
pub const DEFAULT_DESCRIPTION_MAX_BYTES: usize = 99;

/// A unit of work ordered by priority. Lower values are served first.
///
/// Tasks are immutable once built; the description is truncated at
/// construction time rather than rejected. Deserialized tasks go through the
/// same default bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TaskRecord")]
pub struct Task {
    priority: i32,
    description: String,
}

impl Task {
    /// Build a task, truncating the description to [`DEFAULT_DESCRIPTION_MAX_BYTES`].
    pub fn new(priority: i32, description: impl Into<String>) -> Self {
        Self::with_limit(priority, description, DEFAULT_DESCRIPTION_MAX_BYTES)
    }

    /// Build a task whose description holds at most `max_bytes` bytes of UTF-8.
    ///
    /// The cut backs off to the nearest char boundary, so the stored text may
    /// be a few bytes shorter than `max_bytes` for multi-byte input.
    pub fn with_limit(priority: i32, description: impl Into<String>, max_bytes: usize) -> Self {
        let mut description = description.into();
        truncate_at_boundary(&mut description, max_bytes);
        Self {
            priority,
            description,
        }
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Wire shape of a [`Task`] before the description bound is applied.
#[derive(Deserialize)]
struct TaskRecord {
    priority: i32,
    description: String,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self::new(record.priority, record.description)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Priority: {}, Description: {}",
            self.priority, self.description
        )
    }
}

fn truncate_at_boundary(s: &mut String, max_bytes: usize) {
    if s.len() <= max_bytes {
        return;
    }
    let mut cut = max_bytes;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
}
