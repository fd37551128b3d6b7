//! Server configuration from the environment

use std::net::SocketAddr;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3001";
pub const DEFAULT_SEED_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub seed_count: usize,
    /// Start with the failure switch on
    pub start_failing: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

fn env_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup(name) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { name, value: raw }),
        },
        None => Ok(default),
    }
}

fn env_parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}

impl ServerConfig {
    /// Read `MOCK_SERVER_ADDR`, `MOCK_SEED_COUNT` and `MOCK_START_FAILING`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default_addr = DEFAULT_ADDR
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: "MOCK_SERVER_ADDR",
                value: DEFAULT_ADDR.to_string(),
            })?;

        Ok(Self {
            addr: env_parse(&lookup, "MOCK_SERVER_ADDR", default_addr)?,
            seed_count: env_parse(&lookup, "MOCK_SEED_COUNT", DEFAULT_SEED_COUNT)?,
            start_failing: env_flag(&lookup, "MOCK_START_FAILING", false)?,
        })
    }
}
