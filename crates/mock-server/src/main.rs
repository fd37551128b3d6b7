//! Mock todo backend
//!
//! Serves the `/todos` collection on `MOCK_SERVER_ADDR` (default 127.0.0.1:3001).

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_mock_server::{MockState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_mock_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let state = MockState::seeded(config.seed_count);
    state.set_failing(config.start_failing);
    tracing::info!("Seeded {} todos", config.seed_count);
    if config.start_failing {
        tracing::warn!("Failure switch is on; every /todos request answers 500");
    }

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    tracing::info!("Mock todo API listening on {}", config.addr);

    todo_mock_server::serve(listener, state)
        .await
        .context("Server error")?;
    Ok(())
}
