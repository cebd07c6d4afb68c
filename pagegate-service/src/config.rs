//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: PAGEGATE_)
//! 2. Current working directory: ./config.toml
//! 3. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::query::LimitBounds;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,

    /// Pagination configuration
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    #[serde(default = "default_name")]
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Environment (dev, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Public base URL the service is reachable at, used for page links
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

/// Pagination configuration
///
/// Feeds the limit negotiator; see [`PaginationConfig::bounds`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Smallest accepted page size
    #[serde(default = "default_min_limit")]
    pub min_limit: u32,

    /// Largest accepted page size (larger requests clamp to this)
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,

    /// Page size used when the caller does not specify one
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

fn default_name() -> String {
    "pagegate".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_public_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_min_limit() -> u32 {
    crate::query::MIN_LIMIT
}

fn default_max_limit() -> u32 {
    crate::query::MAX_LIMIT
}

fn default_limit() -> u32 {
    crate::query::DEFAULT_LIMIT
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            port: default_port(),
            log_level: default_log_level(),
            environment: default_environment(),
            public_url: default_public_url(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            min_limit: default_min_limit(),
            max_limit: default_max_limit(),
            default_limit: default_limit(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            pagination: PaginationConfig::default(),
        }
    }
}

impl PaginationConfig {
    /// Build the limit bounds the negotiator runs against
    #[must_use]
    pub const fn bounds(&self) -> LimitBounds {
        LimitBounds::new(self.min_limit, self.max_limit, self.default_limit)
    }
}

impl Config {
    /// Load configuration from defaults, ./config.toml, and PAGEGATE_ env vars
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load configuration with an explicit TOML file path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("PAGEGATE_").split("_"))
            .extract()?;
        Ok(config)
    }
}
