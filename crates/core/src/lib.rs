//! Core library for the todo demo
//!
//! This crate contains the client-side logic, including:
//! - Task model and stores (in-memory and remote REST)
//! - The task-list state manager driven by intents
//! - Session state for the logged-in user

pub mod app;
pub mod config;
pub mod error;
pub mod remote;
pub mod session;
pub mod state;
pub mod task;

pub use app::TodoApp;
pub use config::ClientConfig;
pub use error::{Error, StoreOperation};
pub type Result<T> = std::result::Result<T, Error>;
