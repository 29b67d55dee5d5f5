//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `CONSISTENCY_*` environment variables, command-line flags,
//! or an optional configuration file. Every field is optional; accessors apply
//! defaults and validate what was supplied.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::default_fetch_concurrency;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8081";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Invalid configuration values detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("api_base_url is not a valid URL ({value}): {message}")]
    InvalidApiBaseUrl { value: String, message: String },
    #[error("api_base_url must use http or https: {value}")]
    UnsupportedApiScheme { value: String },
    #[error("bind_address is not a socket address ({value}): {message}")]
    InvalidBindAddress { value: String, message: String },
    #[error("timeout_seconds must be greater than zero")]
    ZeroTimeout,
    #[error("fetch_concurrency must be greater than zero")]
    ZeroFetchConcurrency,
}

/// Settings for the consistency service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONSISTENCY")]
pub struct ConsistencySettings {
    /// Base URL of the upstream folder API.
    pub api_base_url: Option<String>,
    /// Per-request timeout for upstream calls, in seconds.
    #[ortho_config(default = 10)]
    pub timeout_seconds: Option<u64>,
    /// Address the HTTP server binds to.
    pub bind_address: Option<String>,
    /// Maximum number of per-user folder fetches in flight.
    pub fetch_concurrency: Option<usize>,
}

impl ConsistencySettings {
    /// Upstream base URL, falling back to the local default.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        let url = Url::parse(raw).map_err(|err| ConfigError::InvalidApiBaseUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(ConfigError::UnsupportedApiScheme {
                value: raw.to_owned(),
            }),
        }
    }

    /// Upstream request timeout.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        match self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS) {
            0 => Err(ConfigError::ZeroTimeout),
            seconds => Ok(Duration::from_secs(seconds)),
        }
    }

    /// Listen address for the HTTP server.
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS);
        raw.parse()
            .map_err(|err: std::net::AddrParseError| ConfigError::InvalidBindAddress {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// Fan-out bound; defaults to twice the available parallelism.
    pub fn fetch_concurrency(&self) -> Result<usize, ConfigError> {
        match self.fetch_concurrency {
            Some(0) => Err(ConfigError::ZeroFetchConcurrency),
            Some(bound) => Ok(bound),
            None => Ok(default_fetch_concurrency()),
        }
    }
}
