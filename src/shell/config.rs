use crate::modules::cart::adapters::outbound::cart_snapshot::CART_STORAGE_KEY;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_STORE_PATH: &str = "./cart-store.json";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is not a valid {expected}: {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub store_path: PathBuf,
    pub storage_key: String,
    pub listen_addr: SocketAddr,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; unset or blank variables take the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let listen_addr = var("CART_LISTEN_ADDR", DEFAULT_LISTEN_ADDR);
        let listen_addr = listen_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                name: "CART_LISTEN_ADDR",
                expected: "socket address",
                value: listen_addr.clone(),
            })?;

        let timeout = var("CART_HTTP_TIMEOUT_MS", &DEFAULT_HTTP_TIMEOUT_MS.to_string());
        let timeout = timeout
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or_else(|| ConfigError::Invalid {
                name: "CART_HTTP_TIMEOUT_MS",
                expected: "positive number of milliseconds",
                value: timeout.clone(),
            })?;

        let api_base_url = var("CART_API_URL", DEFAULT_API_URL);
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                name: "CART_API_URL",
                expected: "http(s) url",
                value: api_base_url,
            });
        }

        Ok(Self {
            api_base_url,
            store_path: PathBuf::from(var("CART_STORE_PATH", DEFAULT_STORE_PATH)),
            storage_key: var("CART_STORAGE_KEY", CART_STORAGE_KEY),
            listen_addr,
            http_timeout: Duration::from_millis(timeout),
        })
    }
}
