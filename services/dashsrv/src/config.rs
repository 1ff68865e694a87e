//! DashSrv configuration
//!
//! Sources, lowest to highest priority: built-in defaults, YAML file,
//! `DASHSRV_` environment variables (`__` separates sections).

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use common::config_loader::get_string_config;
use errors::{DashError, DashResult};

pub const ENV_PREFIX: &str = "DASHSRV_";
/// Backend URL variable understood by earlier dashboard deployments
pub const LEGACY_BACKEND_URL_ENV: &str = "BACKEND_URL";
pub const DEFAULT_PORT: u16 = 6010;
const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const CONFIG_CANDIDATES: &[&str] = &["config/dashsrv.yaml", "dashsrv.yaml"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Backend the adapter reads from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_limit() -> usize {
    20
}

fn default_max_limit() -> usize {
    100
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log root; `PLANTOPS_LOG_DIR` wins over this
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DashConfig {
    /// Load configuration
    ///
    /// An explicit `path` must exist. Without one the first existing
    /// candidate (`config/dashsrv.yaml`, `dashsrv.yaml`) is used, if any.
    pub fn load(path: Option<&Path>) -> DashResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(DashConfig::default()));

        match Self::resolve_file(path)? {
            Some(file) => {
                info!("Loading configuration from {}", file.display());
                figment = figment.merge(Yaml::file(file));
            },
            None => debug!("No configuration file found, using defaults"),
        }

        let mut config: DashConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        let is_default = config.upstream.base_url == DEFAULT_BASE_URL;
        config.upstream.base_url = get_string_config(
            Some(config.upstream.base_url),
            is_default,
            LEGACY_BACKEND_URL_ENV,
            default_base_url(),
        );

        Ok(config)
    }

    fn resolve_file(path: Option<&Path>) -> DashResult<Option<PathBuf>> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(DashError::Configuration(format!(
                    "configuration file not found: {}",
                    path.display()
                )));
            }
            return Ok(Some(path.to_path_buf()));
        }
        Ok(CONFIG_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists()))
    }

    /// Check the values the pipeline relies on
    pub fn validate(&self) -> DashResult<()> {
        let base = self.upstream.base_url.trim();
        if base.is_empty() {
            return Err(invalid("upstream.base_url", "must not be empty"));
        }
        let url = Url::parse(base).map_err(|e| invalid("upstream.base_url", &e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("upstream.base_url", "scheme must be http or https"));
        }
        if self.upstream.timeout_ms == 0 {
            return Err(invalid("upstream.timeout_ms", "must be greater than 0"));
        }
        if self.pagination.default_limit == 0 {
            return Err(invalid("pagination.default_limit", "must be greater than 0"));
        }
        if self.pagination.max_limit == 0 {
            return Err(invalid("pagination.max_limit", "must be greater than 0"));
        }
        if self.pagination.default_limit > self.pagination.max_limit {
            return Err(invalid(
                "pagination.default_limit",
                "must not exceed pagination.max_limit",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> DashError {
    DashError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
