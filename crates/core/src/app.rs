//! Application state
//!
//! Ties the session and the task list together the way the view layer
//! consumes them. The two are independent: logging out never touches tasks.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ClientConfig;
use crate::remote::RemoteTaskStore;
use crate::session::{Session, SessionState};
use crate::state::TaskStateManager;
use crate::task::{LocalTaskStore, TaskRepository};
use crate::Result;

/// Shared application state
pub struct TodoApp<S> {
    inner: Arc<TodoAppInner<S>>,
}

struct TodoAppInner<S> {
    session: RwLock<Session>,
    tasks: TaskStateManager<S>,
}

impl<S> Clone for TodoApp<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl TodoApp<LocalTaskStore> {
    /// App with purely local task state
    pub fn local() -> Self {
        Self::new(TaskStateManager::local())
    }
}

impl TodoApp<RemoteTaskStore> {
    /// App backed by the remote `/todos` collection
    pub fn remote(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(TaskStateManager::remote(config)?))
    }
}

impl<S: TaskRepository> TodoApp<S> {
    pub fn new(tasks: TaskStateManager<S>) -> Self {
        Self {
            inner: Arc::new(TodoAppInner {
                session: RwLock::new(Session::new()),
                tasks,
            }),
        }
    }

    /// Get reference to the task state manager
    pub fn tasks(&self) -> &TaskStateManager<S> {
        &self.inner.tasks
    }

    pub async fn login(&self, name: &str) -> bool {
        self.inner.session.write().await.login(name)
    }

    pub async fn logout(&self) {
        self.inner.session.write().await.logout();
    }

    pub async fn session(&self) -> SessionState {
        self.inner.session.read().await.state()
    }
}
