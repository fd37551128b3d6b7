//! Application state
//!
//! The todo collection lives in memory for the lifetime of the server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

pub const DEFAULT_USER_ID: u64 = 1;

const SAMPLE_TITLES: &[&str] = &[
    "Buy groceries",
    "Walk the dog",
    "Water the plants",
    "Call the bank",
    "Finish the report",
    "Book dentist appointment",
    "Clean the kitchen",
    "Pay electricity bill",
    "Read a chapter",
    "Plan the weekend trip",
];

/// A stored todo, in wire shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    pub user_id: u64,
}

/// Fields a PATCH may carry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub user_id: Option<u64>,
}

/// Shared application state
#[derive(Clone, Default)]
pub struct MockState {
    inner: Arc<MockStateInner>,
}

#[derive(Default)]
struct MockStateInner {
    todos: RwLock<Vec<Todo>>,
    failing: AtomicBool,
}

impl MockState {
    /// Empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection pre-filled with `count` sample todos, ids 1..=count
    pub fn seeded(count: usize) -> Self {
        let todos = (0..count)
            .map(|i| Todo {
                id: i as u64 + 1,
                title: SAMPLE_TITLES[i % SAMPLE_TITLES.len()].to_string(),
                completed: i % 3 == 2,
                user_id: DEFAULT_USER_ID,
            })
            .collect();

        Self {
            inner: Arc::new(MockStateInner {
                todos: RwLock::new(todos),
                failing: AtomicBool::new(false),
            }),
        }
    }

    /// Make every collection request answer 500 until switched back
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    pub fn is_failing(&self) -> bool {
        self.inner.failing.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.inner.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn list(&self, limit: Option<usize>) -> Vec<Todo> {
        let todos = self.inner.todos.read().await;
        let limit = limit.unwrap_or(todos.len());
        todos.iter().take(limit).cloned().collect()
    }

    pub async fn get(&self, id: u64) -> Option<Todo> {
        let todos = self.inner.todos.read().await;
        todos.iter().find(|t| t.id == id).cloned()
    }

    /// Append a todo with the next free id
    pub async fn create(&self, title: String, completed: bool, user_id: u64) -> Todo {
        let mut todos = self.inner.todos.write().await;
        let id = todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let todo = Todo {
            id,
            title,
            completed,
            user_id,
        };
        todos.push(todo.clone());
        todo
    }

    /// Replace every field but the id
    pub async fn replace(
        &self,
        id: u64,
        title: String,
        completed: bool,
        user_id: u64,
    ) -> Option<Todo> {
        let mut todos = self.inner.todos.write().await;
        let slot = todos.iter_mut().find(|t| t.id == id)?;
        *slot = Todo {
            id,
            title,
            completed,
            user_id,
        };
        Some(slot.clone())
    }

    /// Merge the provided fields into an existing todo
    pub async fn patch(&self, id: u64, patch: TodoPatch) -> Option<Todo> {
        let mut todos = self.inner.todos.write().await;
        let slot = todos.iter_mut().find(|t| t.id == id)?;
        if let Some(title) = patch.title {
            slot.title = title;
        }
        if let Some(completed) = patch.completed {
            slot.completed = completed;
        }
        if let Some(user_id) = patch.user_id {
            slot.user_id = user_id;
        }
        Some(slot.clone())
    }

    pub async fn delete(&self, id: u64) -> bool {
        let mut todos = self.inner.todos.write().await;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        todos.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_ids_are_sequential() {
        let state = MockState::seeded(12);
        let todos = state.list(None).await;
        assert_eq!(todos.len(), 12);
        assert_eq!(todos[0].id, 1);
        assert_eq!(todos[11].id, 12);
        assert_eq!(todos[10].title, SAMPLE_TITLES[0]);
    }

    #[tokio::test]
    async fn create_uses_next_free_id() {
        let state = MockState::seeded(3);
        state.delete(2).await;

        let todo = state.create("new".to_string(), false, 1).await;
        assert_eq!(todo.id, 4);
    }

    #[tokio::test]
    async fn patch_merges_fields() {
        let state = MockState::seeded(1);
        let patched = state
            .patch(
                1,
                TodoPatch {
                    completed: Some(true),
                    ..TodoPatch::default()
                },
            )
            .await
            .unwrap();

        assert!(patched.completed);
        assert_eq!(patched.title, SAMPLE_TITLES[0]);
        assert!(state.patch(99, TodoPatch::default()).await.is_none());
    }

    #[tokio::test]
    async fn delete_reports_missing() {
        let state = MockState::seeded(1);
        assert!(state.delete(1).await);
        assert!(!state.delete(1).await);
        assert!(state.is_empty().await);
    }
}
