use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Error, StoreOperation};
use crate::task::{CompletedPatch, NewTodo, Task, TaskId, TaskRepository, TodoRecord};
use crate::Result;

const COLLECTION_PATH: &str = "/todos";

/// Task store backed by a remote `/todos` resource collection
///
/// One attempt per call: no retries, no idempotency keys. Any response
/// outside the 2xx range is reported with the operation's fixed message.
#[derive(Debug, Clone)]
pub struct RemoteTaskStore {
    client: Client,
    base_url: String,
    fetch_limit: usize,
    list_latency: Option<Duration>,
    write_latency: Option<Duration>,
}

impl RemoteTaskStore {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        // The demo backend is always local, so skip system proxies
        let mut builder = Client::builder().no_proxy();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fetch_limit: config.fetch_limit,
            list_latency: config.list_latency,
            write_latency: config.write_latency,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, COLLECTION_PATH)
    }

    fn item_url(&self, id: TaskId) -> String {
        format!("{}{}/{}", self.base_url, COLLECTION_PATH, id)
    }

    fn latency_for(&self, operation: StoreOperation) -> Option<Duration> {
        match operation {
            StoreOperation::List => self.list_latency,
            _ => self.write_latency,
        }
    }

    async fn send(&self, operation: StoreOperation, request: RequestBuilder) -> Result<Response> {
        if let Some(latency) = self.latency_for(operation) {
            debug!(%operation, ?latency, "Delaying remote todo request");
            tokio::time::sleep(latency).await;
        }

        let res = request.send().await.map_err(|e| {
            warn!(%operation, error = %e, "Remote todo request failed");
            Error::remote_transport(operation, e)
        })?;

        let status = res.status();
        if !status.is_success() {
            warn!(%operation, status = status.as_u16(), "Remote todo request rejected");
            return Err(Error::remote_status(operation, status.as_u16()));
        }

        Ok(res)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: StoreOperation,
        request: RequestBuilder,
    ) -> Result<T> {
        let res = self.send(operation, request).await?;
        res.json::<T>().await.map_err(|e| {
            warn!(%operation, error = %e, "Failed to decode todo response");
            Error::remote_transport(operation, e)
        })
    }
}

#[async_trait]
impl TaskRepository for RemoteTaskStore {
    async fn list(&self) -> Result<Vec<Task>> {
        let url = format!("{}?_limit={}", self.collection_url(), self.fetch_limit);
        debug!("GET {}", url);

        let records: Vec<TodoRecord> = self
            .send_json(StoreOperation::List, self.client.get(url))
            .await?;
        Ok(records.into_iter().map(Task::from).collect())
    }

    async fn create(&self, name: &str) -> Result<Task> {
        let url = self.collection_url();
        debug!("POST {}", url);

        let record: TodoRecord = self
            .send_json(
                StoreOperation::Create,
                self.client.post(url).json(&NewTodo::new(name)),
            )
            .await?;
        Ok(record.into())
    }

    async fn replace(&self, task: Task) -> Result<Task> {
        let url = self.item_url(task.id);
        debug!("PUT {}", url);

        let record: TodoRecord = self
            .send_json(
                StoreOperation::Replace,
                self.client.put(url).json(&TodoRecord::from(&task)),
            )
            .await?;
        Ok(record.into())
    }

    async fn set_completed(&self, id: TaskId, completed: bool) -> Result<Task> {
        let url = self.item_url(id);
        debug!("PATCH {}", url);

        let record: TodoRecord = self
            .send_json(
                StoreOperation::PartialUpdate,
                self.client.patch(url).json(&CompletedPatch { completed }),
            )
            .await?;
        Ok(record.into())
    }

    async fn remove(&self, id: TaskId) -> Result<()> {
        let url = self.item_url(id);
        debug!("DELETE {}", url);

        self.send(StoreOperation::Remove, self.client.delete(url))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_base() {
        let config = ClientConfig::default().with_base_url("http://localhost:4000/");
        let store = RemoteTaskStore::new(&config).unwrap();

        assert_eq!(store.base_url(), "http://localhost:4000");
        assert_eq!(store.collection_url(), "http://localhost:4000/todos");
        assert_eq!(store.item_url(12), "http://localhost:4000/todos/12");
    }

    #[test]
    fn list_and_writes_use_their_own_latency() {
        let store = RemoteTaskStore::new(&ClientConfig::default().with_demo_latency()).unwrap();

        assert_eq!(
            store.latency_for(StoreOperation::List),
            Some(Duration::from_millis(500))
        );
        for operation in [
            StoreOperation::Create,
            StoreOperation::Replace,
            StoreOperation::PartialUpdate,
            StoreOperation::Remove,
        ] {
            assert_eq!(store.latency_for(operation), Some(Duration::from_millis(300)));
        }

        let store = RemoteTaskStore::new(&ClientConfig::default()).unwrap();
        assert_eq!(store.latency_for(StoreOperation::List), None);
    }
}
