//! Task model definitions

use serde::{Deserialize, Serialize};

/// Task identifier, assigned by whichever store created the task
pub type TaskId = u64;

/// Owner id sent with every write to the remote collection
pub const DEFAULT_OWNER_ID: u64 = 1;

/// A single todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub completed: bool,
    /// Opaque, carried through for API compatibility
    pub owner_id: u64,
}

impl Task {
    /// Create a new, not yet completed task
    pub fn new(id: TaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
            owner_id: DEFAULT_OWNER_ID,
        }
    }

    /// Set the completion flag
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Set the owner id
    pub fn with_owner_id(mut self, owner_id: u64) -> Self {
        self.owner_id = owner_id;
        self
    }
}

/// Wire shape of an item in the remote `/todos` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    #[serde(default = "default_owner_id")]
    pub user_id: u64,
}

fn default_owner_id() -> u64 {
    DEFAULT_OWNER_ID
}

impl From<TodoRecord> for Task {
    fn from(record: TodoRecord) -> Self {
        Self {
            id: record.id,
            name: record.title,
            completed: record.completed,
            owner_id: record.user_id,
        }
    }
}

impl From<&Task> for TodoRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.name.clone(),
            completed: task.completed,
            user_id: DEFAULT_OWNER_ID,
        }
    }
}

/// Body of a create request; the remote store assigns the id
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
    pub user_id: u64,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
            user_id: DEFAULT_OWNER_ID,
        }
    }
}

/// Body of a partial update that only touches completion
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CompletedPatch {
    pub completed: bool,
}

/// Progress summary over a list of tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub completed: usize,
    pub total: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            completed: tasks.iter().filter(|t| t.completed).count(),
            total: tasks.len(),
        }
    }

    /// Share of completed tasks in percent, 0 for an empty list
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task() {
        let task = Task::new(1, "Buy milk");
        assert_eq!(task.id, 1);
        assert_eq!(task.name, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.owner_id, DEFAULT_OWNER_ID);
    }

    #[test]
    fn test_record_maps_title_to_name() {
        let record: TodoRecord = serde_json::from_str(
            r#"{"id":3,"title":"Walk the dog","completed":true,"userId":4}"#,
        )
        .unwrap();
        let task = Task::from(record);

        assert_eq!(
            task,
            Task::new(3, "Walk the dog")
                .with_completed(true)
                .with_owner_id(4)
        );
    }

    #[test]
    fn test_record_without_user_id_gets_default_owner() {
        let record: TodoRecord =
            serde_json::from_str(r#"{"id":8,"title":"Call mom","completed":false}"#).unwrap();

        assert_eq!(record.user_id, DEFAULT_OWNER_ID);
        assert_eq!(Task::from(record), Task::new(8, "Call mom"));
    }

    #[test]
    fn test_replace_body_uses_default_owner() {
        let task = Task::new(5, "Read").with_owner_id(9).with_completed(true);
        let body = serde_json::to_value(TodoRecord::from(&task)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({"id": 5, "title": "Read", "completed": true, "userId": 1})
        );
    }

    #[test]
    fn test_new_todo_body() {
        let body = serde_json::to_value(NewTodo::new("Buy milk")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": "Buy milk", "completed": false, "userId": 1})
        );
    }

    #[test]
    fn test_stats() {
        let tasks = vec![
            Task::new(1, "a").with_completed(true),
            Task::new(2, "b"),
            Task::new(3, "c"),
            Task::new(4, "d").with_completed(true),
        ];
        let stats = TaskStats::from_tasks(&tasks);

        assert_eq!(stats, TaskStats { completed: 2, total: 4 });
        assert_eq!(stats.percent(), 50.0);
        assert_eq!(TaskStats::default().percent(), 0.0);
    }
}
