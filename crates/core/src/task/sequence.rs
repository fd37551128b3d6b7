//! Id generator for locally created tasks

use std::sync::atomic::{AtomicU64, Ordering};

use super::model::TaskId;

/// Monotonic id sequence, owned by a single store
///
/// Every instance starts from its own seed, so independent stores never
/// share ids.
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    pub fn starting_at(seed: TaskId) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }

    /// Take the next id
    pub fn next_id(&self) -> TaskId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
