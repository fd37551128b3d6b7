//! Mock backend for the todo demo
//!
//! An in-memory, json-server compatible `/todos` collection. Used as the
//! remote store during development and by the client's integration tests.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::{MockState, Todo, TodoPatch};

/// Build the full application router
pub fn app(state: MockState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::todos::router())
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Serve the app on an already bound listener until the task is dropped
pub async fn serve(listener: TcpListener, state: MockState) -> std::io::Result<()> {
    axum::serve(listener, app(state)).await
}
