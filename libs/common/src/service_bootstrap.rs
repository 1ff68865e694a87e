//! Unified service bootstrap utilities
//!
//! Startup banner, logging initialization and environment setup shared by
//! the dashboard services.

use crate::logging::{self, LogConfig};
use tracing::{info, Level};

/// Service metadata for startup
pub struct ServiceInfo {
    /// Service name (e.g., "dashsrv")
    pub name: String,
    /// Service version from Cargo.toml
    pub version: String,
    /// Service description
    pub description: String,
    /// Default port
    pub default_port: u16,
}

impl ServiceInfo {
    /// Create new service info
    pub fn new(name: impl Into<String>, description: impl Into<String>, default_port: u16) -> Self {
        Self {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: description.into(),
            default_port,
        }
    }
}

/// Print unified startup banner for any service
pub fn print_startup_banner(service: &ServiceInfo) {
    let banner = match service.name.as_str() {
        "dashsrv" => {
            r#"
 ██████╗  █████╗ ███████╗██╗  ██╗███████╗██████╗ ██╗   ██╗
 ██╔══██╗██╔══██╗██╔════╝██║  ██║██╔════╝██╔══██╗██║   ██║
 ██║  ██║███████║███████╗███████║███████╗██████╔╝██║   ██║
 ██║  ██║██╔══██║╚════██║██╔══██║╚════██║██╔══██╗╚██╗ ██╔╝
 ██████╔╝██║  ██║███████║██║  ██║███████║██║  ██║ ╚████╔╝
 ╚═════╝ ╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝  ╚═══╝
            "#
        },
        _ => {
            r#"
 ██████╗ ██╗      █████╗ ███╗   ██╗████████╗ ██████╗ ██████╗ ███████╗
 ██╔══██╗██║     ██╔══██╗████╗  ██║╚══██╔══╝██╔═══██╗██╔══██╗██╔════╝
 ██████╔╝██║     ███████║██╔██╗ ██║   ██║   ██║   ██║██████╔╝███████╗
 ██╔═══╝ ██║     ██╔══██║██║╚██╗██║   ██║   ██║   ██║██╔═══╝ ╚════██║
 ██║     ███████╗██║  ██║██║ ╚████║   ██║   ╚██████╔╝██║     ███████║
 ╚═╝     ╚══════╝╚═╝  ╚═╝╚═╝  ╚═══╝   ╚═╝    ╚═════╝ ╚═╝     ╚══════╝
            "#
        },
    };

    info!("{}", banner);
    info!("");
    info!(" {} v{}", service.name.to_uppercase(), service.version);
    info!(" {}", service.description);
    info!(" Default Port: {}", service.default_port);
    info!("");
}

/// Initialize logging for a service with standard configuration
///
/// Log root directory priority:
/// 1. PLANTOPS_LOG_DIR environment variable
/// 2. `config_log_dir` from the service configuration
/// 3. Default "logs"
pub fn init_logging(
    service: &ServiceInfo,
    config_log_dir: Option<&str>,
    console_level: Level,
    ansi: bool,
) -> anyhow::Result<()> {
    logging::init_log_root(config_log_dir);

    let log_dir = logging::get_log_root().join(&service.name);

    let log_config = LogConfig {
        service_name: service.name.clone(),
        log_dir,
        console_level,
        enable_json: false,
        ansi,
        enable_api_log: true,
        api_log_level: Level::INFO,
    };

    logging::init_with_config(log_config).map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}

/// Load environment variables in development mode
///
/// In debug builds, reads `.env` and sets variables that are not already set.
/// In release builds this is a no-op.
pub fn load_development_env() {
    #[cfg(debug_assertions)]
    {
        if let Ok(content) = std::fs::read_to_string(".env") {
            for (key, value) in parse_env_lines(&content) {
                if std::env::var(key).is_err() {
                    std::env::set_var(key, value);
                }
            }
        }
    }
}

/// Parse `KEY=VALUE` lines, skipping comments and blanks
fn parse_env_lines(content: &str) -> Vec<(&str, &str)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect()
}

/// Helper to get service port from configuration or environment
///
/// When the configured port is the default, `SERVICE_PORT` and then
/// `{NAME}_PORT` may override it.
pub fn get_service_port(config_port: u16, service: &ServiceInfo) -> u16 {
    let is_default = config_port == 0 || config_port == service.default_port;

    if is_default {
        if let Ok(port) = std::env::var("SERVICE_PORT") {
            if let Ok(p) = port.parse::<u16>() {
                return p;
            }
        }

        let env_var = format!("{}_PORT", service.name.to_uppercase());
        if let Ok(port) = std::env::var(&env_var) {
            if let Ok(p) = port.parse::<u16>() {
                return p;
            }
        }
    }

    if config_port > 0 {
        config_port
    } else {
        service.default_port
    }
}
