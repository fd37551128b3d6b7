//! In-memory task storage implementation
//!
//! Keeps tasks in insertion order for the lifetime of the process.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::model::{Task, TaskId};
use super::repository::TaskRepository;
use super::sequence::IdSequence;
use crate::{Error, Result};

/// In-memory task store with locally assigned ids
///
/// Unknown ids are reported as [`Error::TaskNotFound`], so the state manager
/// records them the same way it records remote failures.
#[derive(Debug, Default)]
pub struct LocalTaskStore {
    ids: IdSequence,
    tasks: RwLock<Vec<Task>>,
}

impl LocalTaskStore {
    /// Create an empty store whose ids start at 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store whose ids start at `seed`
    pub fn with_seed(seed: TaskId) -> Self {
        Self {
            ids: IdSequence::starting_at(seed),
            tasks: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TaskRepository for LocalTaskStore {
    async fn list(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.read().await.clone())
    }

    async fn create(&self, name: &str) -> Result<Task> {
        let task = Task::new(self.ids.next_id(), name);
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn replace(&self, task: Task) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(Error::TaskNotFound(task.id))?;
        slot.name = task.name;
        slot.completed = task.completed;
        Ok(slot.clone())
    }

    async fn set_completed(&self, id: TaskId, completed: bool) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        slot.completed = completed;
        Ok(slot.clone())
    }

    async fn remove(&self, id: TaskId) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(Error::TaskNotFound(id));
        }
        Ok(())
    }
}
