use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use getset::{CopyGetters, Getters};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const CONFIG_PATH_VAR: &str = "AGGREGATOR_CONFIG";
pub const ENV_PREFIX: &str = "AGGREGATOR_";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, CopyGetters)]
#[serde(default)]
pub struct ServerConfig {
    #[getset(get = "pub")]
    address: String,
    #[getset(get_copy = "pub")]
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 1701,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct UpstreamConfig {
    #[getset(get = "pub")]
    base_url: String,
    request_timeout_ms: u64,
    fanout_timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: post_search_client::client::hatchways::DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 5_000,
            fanout_timeout_ms: 10_000,
        }
    }
}

impl UpstreamConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn fanout_timeout(&self) -> Duration {
        Duration::from_millis(self.fanout_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct CacheConfig {
    /// Human readable duration, e.g. `1h`. Zero or unparsable disables caching.
    #[getset(get = "pub")]
    ttl: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: "1h".to_string(),
        }
    }
}

impl CacheConfig {
    pub fn ttl_duration(&self) -> Duration {
        crate::cache::parse_ttl(&self.ttl)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct HealthConfig {
    /// `host:port` checked by the ping route.
    #[getset(get = "pub")]
    host: String,
    timeout_ms: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            host: "api.hatchways.io:80".to_string(),
            timeout_ms: 1_000,
        }
    }
}

impl HealthConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
#[get = "pub"]
pub struct Config {
    server: ServerConfig,
    upstream: UpstreamConfig,
    cache: CacheConfig,
    health: HealthConfig,
    log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            cache: CacheConfig::default(),
            health: HealthConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then the YAML file named by `AGGREGATOR_CONFIG` (or
    /// `config.yaml` when unset, ignored if missing), then `AGGREGATOR_*`
    /// environment variables with `__` separating nested keys.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::from_figment(Self::figment(&path).merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Defaults overlaid with the YAML file at `path`.
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Yaml::file(path))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(|err| ConfigError::Figment(Box::new(err)))
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}
