//! Task state manager
//!
//! Drives a [`TaskRepository`] from intents and reduces each outcome into the
//! canonical [`TaskListState`]. All updates are pessimistic: the list only
//! changes after the store confirms.

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{OperationKind, TaskIntent, TaskListState};
use crate::config::{ClientConfig, DEFAULT_ERROR_DISPLAY};
use crate::remote::RemoteTaskStore;
use crate::task::{LocalTaskStore, Task, TaskId, TaskRepository, TaskStats, DEFAULT_OWNER_ID};
use crate::{Error, Result};

/// Holds the task list and runs intents against a store
///
/// State lives in a watch channel: every mutation is a single synchronous
/// closure, and view layers can [`subscribe`](Self::subscribe) to changes.
/// Mutations never span an await.
pub struct TaskStateManager<S> {
    store: Arc<S>,
    state: Arc<watch::Sender<TaskListState>>,
    error_display: Option<Duration>,
    /// Bumped whenever the displayed error changes; stale clear timers compare against it
    error_epoch: Arc<AtomicU64>,
}

impl TaskStateManager<LocalTaskStore> {
    /// Manager over a fresh in-memory store with ids starting at 1
    pub fn local() -> Self {
        Self::new(LocalTaskStore::new())
    }
}

impl TaskStateManager<RemoteTaskStore> {
    /// Manager over the remote `/todos` collection described by `config`
    pub fn remote(config: &ClientConfig) -> Result<Self> {
        let store = RemoteTaskStore::new(config)?;
        Ok(Self::new(store).with_error_display(config.error_display))
    }
}

impl<S: TaskRepository> TaskStateManager<S> {
    pub fn new(store: S) -> Self {
        Self::with_store(Arc::new(store))
    }

    /// Create a manager over a shared store
    pub fn with_store(store: Arc<S>) -> Self {
        let (state, _) = watch::channel(TaskListState::default());
        Self {
            store,
            state: Arc::new(state),
            error_display: Some(DEFAULT_ERROR_DISPLAY),
            error_epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Set how long recorded errors stay visible; `None` keeps them until cleared
    pub fn with_error_display(mut self, display: Option<Duration>) -> Self {
        self.error_display = display;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> TaskListState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<TaskListState> {
        self.state.subscribe()
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.state.borrow().task(id).cloned()
    }

    pub fn stats(&self) -> TaskStats {
        self.state.borrow().stats()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Run one intent to completion
    pub async fn dispatch(&self, intent: TaskIntent) -> Result<()> {
        match intent {
            TaskIntent::FetchAll => self.fetch_all().await,
            TaskIntent::Add { name } => self.add(&name).await,
            TaskIntent::Update { id, name } => self.update(id, &name).await,
            TaskIntent::Toggle { id, completed } => self.toggle(id, completed).await,
            TaskIntent::Delete { id } => self.delete(id).await,
            TaskIntent::ClearError => {
                self.clear_error();
                Ok(())
            }
        }
    }

    /// Replace the list with the store's collection
    ///
    /// On failure the current items are kept as they are.
    pub async fn fetch_all(&self) -> Result<()> {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        info!("Fetching tasks");

        match self.store.list().await {
            Ok(tasks) => {
                let tasks = unique_by_id(tasks);
                debug!(count = tasks.len(), "Fetched tasks");
                self.state.send_modify(|s| {
                    s.items = tasks;
                    s.loading = false;
                });
                Ok(())
            }
            Err(e) => {
                self.fail(&e, |s| s.loading = false);
                Err(e)
            }
        }
    }

    /// Create a task and append the store's copy
    pub async fn add(&self, name: &str) -> Result<()> {
        self.run_busy(
            OperationKind::Add,
            true,
            self.store.create(name),
            |items: &mut Vec<Task>, task: Task| match items.iter_mut().find(|t| t.id == task.id) {
                Some(slot) => {
                    warn!(id = task.id, "Store returned an id already in the list");
                    *slot = task;
                }
                None => items.push(task),
            },
        )
        .await
    }

    /// Rename a task, keeping the completion flag currently shown for it
    pub async fn update(&self, id: TaskId, name: &str) -> Result<()> {
        let completed = self
            .state
            .borrow()
            .task(id)
            .map(|t| t.completed)
            .unwrap_or(false);
        let task = Task {
            id,
            name: name.to_string(),
            completed,
            owner_id: DEFAULT_OWNER_ID,
        };

        self.run_busy(
            OperationKind::Update,
            false,
            self.store.replace(task),
            |items: &mut Vec<Task>, task: Task| replace_in_place(items, id, task),
        )
        .await
    }

    /// Set a task's completion flag to `completed`
    pub async fn toggle(&self, id: TaskId, completed: bool) -> Result<()> {
        self.run_busy(
            OperationKind::Toggle,
            false,
            self.store.set_completed(id, completed),
            |items: &mut Vec<Task>, task: Task| replace_in_place(items, id, task),
        )
        .await
    }

    pub async fn delete(&self, id: TaskId) -> Result<()> {
        self.run_busy(
            OperationKind::Delete,
            false,
            self.store.remove(id),
            |items: &mut Vec<Task>, ()| items.retain(|t| t.id != id),
        )
        .await
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| {
            self.error_epoch.fetch_add(1, Ordering::SeqCst);
            s.error.take().is_some()
        });
    }

    async fn run_busy<T, Fut>(
        &self,
        kind: OperationKind,
        clear_error: bool,
        request: Fut,
        apply: impl FnOnce(&mut Vec<Task>, T),
    ) -> Result<()>
    where
        Fut: Future<Output = Result<T>>,
    {
        self.state.send_modify(|s| {
            s.busy.begin(kind);
            if clear_error {
                s.error = None;
            }
        });

        match request.await {
            Ok(value) => {
                self.state.send_modify(|s| {
                    apply(&mut s.items, value);
                    s.busy.finish(kind);
                });
                Ok(())
            }
            Err(e) => {
                self.fail(&e, |s| s.busy.finish(kind));
                Err(e)
            }
        }
    }

    /// Settle a failed request and show its message
    fn fail(&self, err: &Error, settle: impl FnOnce(&mut TaskListState)) {
        warn!(error = %err, "Task operation failed");
        let message = err.to_string();
        let mut epoch = 0;
        self.state.send_modify(|s| {
            settle(s);
            s.error = Some(message);
            epoch = self.error_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        });
        self.schedule_error_clear(epoch);
    }

    fn schedule_error_clear(&self, epoch: u64) {
        let Some(display) = self.error_display else {
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("No runtime; error stays until cleared");
            return;
        };

        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.error_epoch);
        handle.spawn(async move {
            tokio::time::sleep(display).await;
            state.send_if_modified(|s| {
                if current.load(Ordering::SeqCst) != epoch {
                    return false;
                }
                s.error.take().is_some()
            });
        });
    }
}

/// Swap in the store's copy of `id`, dropping it if the task is gone
fn replace_in_place(items: &mut [Task], id: TaskId, mut task: Task) {
    match items.iter_mut().find(|t| t.id == id) {
        Some(slot) => {
            task.id = id;
            *slot = task;
        }
        None => debug!(id, "Dropping result for task no longer in the list"),
    }
}

fn unique_by_id(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::new();
    tasks.into_iter().filter(|t| seen.insert(t.id)).collect()
}
