//! Remote task store
//!
//! REST client for a json-server style `/todos` collection.

mod client;

pub use client::RemoteTaskStore;
