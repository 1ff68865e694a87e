//! Common command-line arguments for dashboard services
//!
//! Services flatten this structure into their own parser so bootstrap code
//! can read log level and bind overrides the same way everywhere.

/// Common service startup arguments
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct ServiceArgs {
    /// Log level (trace, debug, info, warn, error); overrides the configured level
    #[cfg_attr(feature = "cli", arg(short = 'l', long))]
    pub log_level: Option<String>,

    /// Optional bind address override (e.g., 127.0.0.1:6010)
    #[cfg_attr(feature = "cli", arg(short = 'b', long, env = "BIND_ADDRESS"))]
    pub bind_address: Option<String>,

    /// Enable debug mode with verbose output
    #[cfg_attr(feature = "cli", arg(long, env = "DEBUG"))]
    pub debug: bool,

    /// Disable colored output (useful for log files)
    #[cfg_attr(feature = "cli", arg(long))]
    pub no_color: bool,

    /// Only validate configuration without starting service
    #[cfg_attr(feature = "cli", arg(long))]
    pub validate: bool,
}

impl ServiceArgs {
    /// Resolve the log level, using `configured` when `--log-level` is absent
    pub fn parse_log_level(&self, configured: &str) -> tracing::Level {
        if self.debug {
            return tracing::Level::DEBUG;
        }
        let level = self.log_level.as_deref().unwrap_or(configured);
        match level.to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "warn" | "warning" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }

    /// Parse the bind override into host and port
    ///
    /// Returns `None` when no override is set or it is not `host:port`.
    pub fn bind_override(&self) -> Option<(String, u16)> {
        let addr = self.bind_address.as_deref()?;
        let (host, port) = addr.rsplit_once(':')?;
        let port = port.parse().ok()?;
        Some((host.to_string(), port))
    }
}
