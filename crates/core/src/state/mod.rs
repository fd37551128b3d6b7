//! Task list state
//!
//! The canonical in-memory task list plus its status flags, and the manager
//! that reduces store outcomes into it.

mod intent;
mod manager;

pub use intent::TaskIntent;
pub use manager::TaskStateManager;

use serde::Serialize;

use crate::task::{Task, TaskId, TaskStats};

/// Operation kinds that carry a busy flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Add,
    Update,
    Delete,
    Toggle,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [Self::Add, Self::Update, Self::Delete, Self::Toggle];

    fn index(self) -> usize {
        match self {
            Self::Add => 0,
            Self::Update => 1,
            Self::Delete => 2,
            Self::Toggle => 3,
        }
    }
}

/// Per-kind busy flags
///
/// Each flag counts outstanding requests of its kind, so a kind stays busy
/// until the last of its requests resolves. Nothing here rejects or joins a
/// second dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationBusy {
    in_flight: [u32; 4],
}

impl OperationBusy {
    pub fn is_busy(&self, kind: OperationKind) -> bool {
        self.in_flight[kind.index()] > 0
    }

    /// Number of outstanding requests of `kind`
    pub fn in_flight(&self, kind: OperationKind) -> u32 {
        self.in_flight[kind.index()]
    }

    pub fn any(&self) -> bool {
        self.in_flight.iter().any(|n| *n > 0)
    }

    pub(crate) fn begin(&mut self, kind: OperationKind) {
        self.in_flight[kind.index()] += 1;
    }

    pub(crate) fn finish(&mut self, kind: OperationKind) {
        let slot = &mut self.in_flight[kind.index()];
        *slot = slot.saturating_sub(1);
    }
}

/// Snapshot of the task list as the view layer sees it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListState {
    /// Tasks in arrival/fetch order, unique by id
    pub items: Vec<Task>,
    /// True only while the initial fetch is outstanding
    pub loading: bool,
    /// Last failure message, if still displayed
    pub error: Option<String>,
    pub busy: OperationBusy,
}

impl TaskListState {
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_counts_outstanding_requests() {
        let mut busy = OperationBusy::default();
        assert!(!busy.any());

        busy.begin(OperationKind::Add);
        busy.begin(OperationKind::Add);
        busy.finish(OperationKind::Add);
        assert!(busy.is_busy(OperationKind::Add));
        assert!(!busy.is_busy(OperationKind::Delete));

        busy.finish(OperationKind::Add);
        assert!(!busy.is_busy(OperationKind::Add));

        // Extra finishes never underflow
        busy.finish(OperationKind::Add);
        assert_eq!(busy.in_flight(OperationKind::Add), 0);
    }

    #[test]
    fn kinds_are_independent() {
        let mut busy = OperationBusy::default();
        for kind in OperationKind::ALL {
            busy.begin(kind);
        }
        busy.finish(OperationKind::Toggle);

        assert!(busy.is_busy(OperationKind::Add));
        assert!(busy.is_busy(OperationKind::Update));
        assert!(busy.is_busy(OperationKind::Delete));
        assert!(!busy.is_busy(OperationKind::Toggle));
    }
}
