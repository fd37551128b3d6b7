//! Task repository trait
//!
//! Defines the interface the state manager drives, implemented by the
//! in-memory store and the remote REST client.

use async_trait::async_trait;

use super::model::{Task, TaskId};
use crate::Result;

/// Repository interface for task CRUD operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Get the task collection, in store order
    async fn list(&self) -> Result<Vec<Task>>;

    /// Create a not yet completed task; the store assigns the id
    async fn create(&self, name: &str) -> Result<Task>;

    /// Replace a task's name and completion flag
    async fn replace(&self, task: Task) -> Result<Task>;

    /// Update only the completion flag
    async fn set_completed(&self, id: TaskId, completed: bool) -> Result<Task>;

    /// Delete a task by ID
    async fn remove(&self, id: TaskId) -> Result<()>;
}
