//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::arrivals::ArrivalsConfig;
use crate::cache::CacheConfig;
use crate::commute::CommuteStoreConfig;

/// Errors reading configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the whole server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Arrivals feed sources, tried in order
    pub feed_urls: Vec<String>,
    /// How often the background poller refreshes arrivals
    pub poll_interval: Duration,
    /// How long a fetched feed is served before refetching on demand
    pub cache_ttl: Duration,
    /// Where the commute pair is saved
    pub commute_file: PathBuf,
    /// Optional JSON topology replacing the built-in PATH network
    pub topology_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            feed_urls: ArrivalsConfig::default().urls,
            poll_interval: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(60),
            commute_file: CommuteStoreConfig::default().path,
            topology_file: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from `PATH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`. Unset or empty variables keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get("PATH_BIND_ADDR") {
            config.bind_addr = value.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: "PATH_BIND_ADDR",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(value) = get("PATH_FEED_URLS") {
            config.feed_urls = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(value) = get("PATH_POLL_SECS") {
            config.poll_interval = parse_secs("PATH_POLL_SECS", &value)?;
        }

        if let Some(value) = get("PATH_CACHE_TTL_SECS") {
            config.cache_ttl = parse_secs("PATH_CACHE_TTL_SECS", &value)?;
        }

        if let Some(value) = get("PATH_COMMUTE_FILE") {
            config.commute_file = PathBuf::from(value);
        }

        if let Some(value) = get("PATH_TOPOLOGY_FILE") {
            config.topology_file = Some(PathBuf::from(value));
        }

        Ok(config)
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_feed_urls(mut self, urls: Vec<String>) -> Self {
        self.feed_urls = urls;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_commute_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.commute_file = path.into();
        self
    }

    pub fn arrivals_config(&self) -> ArrivalsConfig {
        ArrivalsConfig::new(self.feed_urls.clone())
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::default().with_ttl(self.cache_ttl)
    }

    pub fn commute_store_config(&self) -> CommuteStoreConfig {
        CommuteStoreConfig::new(&self.commute_file)
    }
}

/// Parse a positive number of seconds.
fn parse_secs(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason,
    };

    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;
    if secs == 0 {
        return Err(invalid("must be at least 1".to_string()));
    }
    Ok(Duration::from_secs(secs))
}
