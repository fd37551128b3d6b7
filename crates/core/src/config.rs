//! Client configuration
//!
//! Defaults match the demo backend; every field can be overridden from the
//! environment.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_FETCH_LIMIT: usize = 10;
pub const DEFAULT_ERROR_DISPLAY: Duration = Duration::from_secs(5);

/// Demo delays: lists feel slower than single-item writes
pub const DEMO_LIST_LATENCY: Duration = Duration::from_millis(500);
pub const DEMO_WRITE_LATENCY: Duration = Duration::from_millis(300);

/// Configuration for the remote store and the state manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address of the `/todos` collection, without trailing slash
    pub base_url: String,
    /// `_limit` sent with every list request
    pub fetch_limit: usize,
    /// Artificial delay before each list request
    pub list_latency: Option<Duration>,
    /// Artificial delay before each create, replace, patch or delete
    pub write_latency: Option<Duration>,
    /// Per-request timeout; `None` keeps the transport default
    pub request_timeout: Option<Duration>,
    /// How long a recorded error stays visible; `None` keeps it until cleared
    pub error_display: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            list_latency: None,
            write_latency: None,
            request_timeout: None,
            error_display: Some(DEFAULT_ERROR_DISPLAY),
        }
    }
}

impl ClientConfig {
    /// Build a config from `TODO_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("TODO_API_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Some(limit) = parse_var::<usize>(&lookup, "TODO_FETCH_LIMIT")? {
            config.fetch_limit = limit;
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "TODO_LIST_LATENCY_MS")? {
            config.list_latency = non_zero_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "TODO_WRITE_LATENCY_MS")? {
            config.write_latency = non_zero_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "TODO_REQUEST_TIMEOUT_MS")? {
            config.request_timeout = non_zero_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "TODO_ERROR_DISPLAY_MS")? {
            config.error_display = non_zero_millis(ms);
        }

        Ok(config)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the list limit
    pub fn with_fetch_limit(mut self, fetch_limit: usize) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }

    /// Delay list requests by `list` and every write by `write`
    pub fn with_simulated_latency(mut self, list: Duration, write: Duration) -> Self {
        self.list_latency = non_zero(list);
        self.write_latency = non_zero(write);
        self
    }

    /// Use the demo delays of 500 ms for lists and 300 ms for writes
    pub fn with_demo_latency(self) -> Self {
        self.with_simulated_latency(DEMO_LIST_LATENCY, DEMO_WRITE_LATENCY)
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the error display timeout
    pub fn with_error_display(mut self, display: Option<Duration>) -> Self {
        self.error_display = display;
        self
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::Config(format!("{name}={raw:?}: {e}"))),
        None => Ok(None),
    }
}

fn non_zero_millis(ms: u64) -> Option<Duration> {
    non_zero(Duration::from_millis(ms))
}

fn non_zero(duration: Duration) -> Option<Duration> {
    (!duration.is_zero()).then_some(duration)
}
