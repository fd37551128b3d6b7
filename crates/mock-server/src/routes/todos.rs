//! Todo collection endpoints
//!
//! json-server compatible CRUD over `/todos`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::{MockState, Todo, TodoPatch, DEFAULT_USER_ID};

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "_limit", default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoBody {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_user_id")]
    pub user_id: u64,
}

fn default_user_id() -> u64 {
    DEFAULT_USER_ID
}

fn ensure_available(state: &MockState) -> Result<(), ApiError> {
    if state.is_failing() {
        return Err(ApiError::Unavailable);
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title cannot be empty".to_string()));
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /todos - List todos, optionally capped by `_limit`
async fn list_todos(
    State(state): State<MockState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    ensure_available(&state)?;
    Ok(Json(state.list(query.limit).await))
}

/// POST /todos - Create a todo
async fn create_todo(
    State(state): State<MockState>,
    Json(req): Json<TodoBody>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    ensure_available(&state)?;
    validate_title(&req.title)?;

    let created = state.create(req.title, req.completed, req.user_id).await;
    tracing::info!(id = created.id, "Created todo");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /todos/{id} - Get a single todo
async fn get_todo(
    State(state): State<MockState>,
    Path(id): Path<u64>,
) -> Result<Json<Todo>, ApiError> {
    ensure_available(&state)?;
    state.get(id).await.map(Json).ok_or(ApiError::NotFound(id))
}

/// PUT /todos/{id} - Replace a todo; the id always comes from the path
async fn replace_todo(
    State(state): State<MockState>,
    Path(id): Path<u64>,
    Json(req): Json<TodoBody>,
) -> Result<Json<Todo>, ApiError> {
    ensure_available(&state)?;
    validate_title(&req.title)?;

    state
        .replace(id, req.title, req.completed, req.user_id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// PATCH /todos/{id} - Merge fields into a todo
async fn patch_todo(
    State(state): State<MockState>,
    Path(id): Path<u64>,
    Json(req): Json<TodoPatch>,
) -> Result<Json<Todo>, ApiError> {
    ensure_available(&state)?;
    if let Some(title) = &req.title {
        validate_title(title)?;
    }

    state.patch(id, req).await.map(Json).ok_or(ApiError::NotFound(id))
}

/// DELETE /todos/{id} - Delete a todo
async fn delete_todo(
    State(state): State<MockState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    ensure_available(&state)?;

    if state.delete(id).await {
        tracing::info!(id, "Deleted todo");
        Ok(Json(json!({})))
    } else {
        Err(ApiError::NotFound(id))
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<MockState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo)
                .put(replace_todo)
                .patch(patch_todo)
                .delete(delete_todo),
        )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::state::MockState;

    fn app(state: MockState) -> axum::Router {
        super::router().with_state(state)
    }

    async fn send(
        app: axum::Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, payload)
    }

    #[tokio::test]
    async fn list_honours_limit() {
        let app = app(MockState::seeded(15));

        let (status, payload) = send(app.clone(), "GET", "/todos?_limit=10", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.as_array().unwrap().len(), 10);
        assert_eq!(payload[0]["id"], 1);
        assert!(payload[0]["userId"].is_u64());

        let (_, payload) = send(app, "GET", "/todos", None).await;
        assert_eq!(payload.as_array().unwrap().len(), 15);
    }

    #[tokio::test]
    async fn todo_crud_round() {
        let state = MockState::new();
        let app = app(state.clone());

        let (status, created) = send(
            app.clone(),
            "POST",
            "/todos",
            Some(json!({"title": "Buy milk", "completed": false, "userId": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created, json!({"id": 1, "title": "Buy milk", "completed": false, "userId": 1}));

        let (status, patched) = send(
            app.clone(),
            "PATCH",
            "/todos/1",
            Some(json!({"completed": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["completed"], true);
        assert_eq!(patched["title"], "Buy milk");

        let (status, replaced) = send(
            app.clone(),
            "PUT",
            "/todos/1",
            Some(json!({"id": 1, "title": "Buy oat milk", "completed": true, "userId": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(replaced["title"], "Buy oat milk");

        let (status, body) = send(app.clone(), "DELETE", "/todos/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));
        assert!(state.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let app = app(MockState::seeded(2));

        for (method, body) in [
            ("GET", None),
            ("PATCH", Some(json!({"completed": true}))),
            ("PUT", Some(json!({"title": "x", "completed": false}))),
            ("DELETE", None),
        ] {
            let (status, payload) = send(app.clone(), method, "/todos/42", body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
            assert_eq!(payload, json!({}));
        }
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let state = MockState::new();
        let app = app(state.clone());

        let (status, _) = send(app, "POST", "/todos", Some(json!({"title": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(state.is_empty().await);
    }

    #[tokio::test]
    async fn failure_switch_returns_server_error() {
        let state = MockState::seeded(3);
        state.set_failing(true);
        let app = app(state.clone());

        let (status, _) = send(app.clone(), "GET", "/todos?_limit=10", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = send(app.clone(), "DELETE", "/todos/1", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(state.len().await, 3);

        state.set_failing(false);
        let (status, _) = send(app, "GET", "/todos", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
