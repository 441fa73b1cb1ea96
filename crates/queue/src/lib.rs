pub mod error;
pub mod heap;
pub mod shared;

pub use error::QueueError;
pub use heap::{DrainSorted, PriorityQueue};
pub use shared::SharedQueue;
pub use taskheap_core::Task;
