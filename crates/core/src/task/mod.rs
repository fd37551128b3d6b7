//! Task module
//!
//! This module contains task-related types and the in-memory store.

mod local_store;
mod model;
mod repository;
mod sequence;

pub use local_store::LocalTaskStore;
pub use model::*;
pub use repository::TaskRepository;
pub use sequence::IdSequence;
