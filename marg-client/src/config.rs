//! Runtime configuration for the client server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{ApiConfig, DEFAULT_BASE_URL};
use crate::cache::CacheConfig;

/// Initial map view: central Pune.
pub const DEFAULT_MAP_CENTER: (f64, f64) = (18.5204, 73.8567);
pub const DEFAULT_MAP_ZOOM: u8 = 13;

/// Front-end assets shipped with the crate, independent of the working
/// directory. `MARG_STATIC_DIR` overrides it for installed binaries.
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// A configuration variable held a value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Configuration for the client server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Trip-search API base URL, including `/api/v1`.
    pub api_base_url: String,

    /// Address the web server listens on.
    pub bind_addr: SocketAddr,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// Serve this search response document instead of calling the API.
    pub mock_routes: Option<PathBuf>,

    /// Upstream request timeout. Also bounds each search.
    pub timeout_secs: u64,

    /// How long the stop list is cached.
    pub stops_ttl_secs: u64,

    pub map_center: (f64, f64),
    pub map_zoom: u8,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            mock_routes: None,
            timeout_secs: 30,
            stops_ttl_secs: 300,
            map_center: DEFAULT_MAP_CENTER,
            map_zoom: DEFAULT_MAP_ZOOM,
        }
    }
}

impl ClientConfig {
    /// Read configuration from `MARG_*` environment variables.
    ///
    /// Unset variables keep their defaults; set but unparseable ones are
    /// an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("MARG_API_BASE_URL") {
            config = config.with_api_base_url(url);
        }
        if let Some(addr) = lookup("MARG_BIND_ADDR") {
            config.bind_addr = parse("MARG_BIND_ADDR", addr)?;
        }
        if let Some(dir) = lookup("MARG_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        config.mock_routes = lookup("MARG_MOCK_ROUTES")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        if let Some(secs) = lookup("MARG_TIMEOUT_SECS") {
            config.timeout_secs = parse("MARG_TIMEOUT_SECS", secs)?;
        }
        if let Some(secs) = lookup("MARG_STOPS_TTL_SECS") {
            config.stops_ttl_secs = parse("MARG_STOPS_TTL_SECS", secs)?;
        }

        Ok(config)
    }

    /// Set the API base URL. A trailing slash is dropped.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_mock_routes(mut self, path: impl Into<PathBuf>) -> Self {
        self.mock_routes = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Settings for the API client.
    pub fn api(&self) -> ApiConfig {
        ApiConfig::new()
            .with_base_url(&self.api_base_url)
            .with_timeout(self.timeout_secs)
    }

    /// Settings for the stops cache.
    pub fn cache(&self) -> CacheConfig {
        CacheConfig::with_ttl(Duration::from_secs(self.stops_ttl_secs))
    }

    /// Upper bound on one route search.
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError { var, value })
}
