//! Unified logging module for PlantOps services
//!
//! Console output plus daily-rolling log files, with HTTP access logs split
//! into their own file through the `api_access` target.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter,
    fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Target used by the HTTP access middleware
pub const API_ACCESS_TARGET: &str = "api_access";

/// Environment variable overriding the log root directory
pub const LOG_DIR_ENV: &str = "PLANTOPS_LOG_DIR";

/// Custom format for log level with brackets: `[INFO]`, `[WARN]`, etc.
fn format_level(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "[TRACE]",
        Level::DEBUG => "[DEBUG]",
        Level::INFO => "[INFO]",
        Level::WARN => "[WARN]",
        Level::ERROR => "[ERROR]",
    }
}

/// Custom event formatter that outputs: `timestamp [LEVEL] message`
///
/// Example output: `2026-03-02T00:50:44.809123Z [WARN] Upstream unavailable, serving fallback`
struct BracketedLevelFormat;

impl<S, N> FormatEvent<S, N> for BracketedLevelFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let now = chrono::Utc::now();
        write!(writer, "{} ", now.format("%Y-%m-%dT%H:%M:%S%.6fZ"))?;

        let level = *event.metadata().level();
        if writer.has_ansi_escapes() {
            let color = match level {
                Level::TRACE => "\x1b[35m",
                Level::DEBUG => "\x1b[34m",
                Level::INFO => "\x1b[32m",
                Level::WARN => "\x1b[33m",
                Level::ERROR => "\x1b[31m",
            };
            write!(writer, "{}{}\x1b[0m ", color, format_level(&level))?;
        } else {
            write!(writer, "{} ", format_level(&level))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

// Keeps non-blocking writers flushing for the process lifetime
static GUARDS: OnceLock<Mutex<Vec<WorkerGuard>>> = OnceLock::new();

// ============================================================================
// Log Root Directory Configuration
// ============================================================================

/// Priority: PLANTOPS_LOG_DIR env > config_dir > default "logs"
static LOG_ROOT: OnceLock<PathBuf> = OnceLock::new();

/// Initialize log root directory from config or environment
///
/// Call early during bootstrap, before anything writes to files.
pub fn init_log_root(config_dir: Option<&str>) {
    LOG_ROOT.get_or_init(|| {
        std::env::var(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                config_dir
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("logs"))
            })
    });
}

/// Get log root directory
///
/// Falls back to the environment or "logs" when `init_log_root` was not called.
pub fn get_log_root() -> PathBuf {
    LOG_ROOT.get().cloned().unwrap_or_else(|| {
        std::env::var(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"))
    })
}

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Service name (e.g., "dashsrv")
    pub service_name: String,
    /// Base directory for logs
    pub log_dir: PathBuf,
    /// Default level when RUST_LOG is not set
    pub console_level: Level,
    /// Enable JSON format for the business log file
    pub enable_json: bool,
    /// Enable colored console output
    pub ansi: bool,
    /// Enable API log separation
    pub enable_api_log: bool,
    /// API log level
    pub api_log_level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".to_string(),
            log_dir: get_log_root(),
            console_level: Level::INFO,
            enable_json: false,
            ansi: true,
            enable_api_log: true,
            api_log_level: Level::INFO,
        }
    }
}

/// Build the filter string used when RUST_LOG does not decide it
///
/// `RUST_LOG` wins; `api_access` is appended unless it already names it.
fn build_filter_string(config: &LogConfig, rust_log: Option<&str>) -> String {
    let api_level = if config.enable_api_log {
        config.api_log_level.as_str().to_lowercase()
    } else {
        "off".to_string()
    };

    match rust_log {
        Some(env_str) if env_str.contains(API_ACCESS_TARGET) => env_str.to_string(),
        Some(env_str) => format!("{},{}={}", env_str, API_ACCESS_TARGET, api_level),
        None => format!(
            "{},{}=debug,{}={}",
            config.console_level.as_str().to_lowercase(),
            config.service_name,
            API_ACCESS_TARGET,
            api_level
        ),
    }
}

fn store_guard(guard: WorkerGuard) {
    let guards = GUARDS.get_or_init(|| Mutex::new(Vec::new()));
    match guards.lock() {
        Ok(mut guards) => guards.push(guard),
        Err(poisoned) => poisoned.into_inner().push(guard),
    }
}

/// Initialize logging system with configuration
pub fn init_with_config(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(&config.log_dir)?;

    let rust_log = std::env::var("RUST_LOG").ok();
    let filter_str = build_filter_string(&config, rust_log.as_deref());
    let env_filter = EnvFilter::try_new(&filter_str)?;

    // Console layer handles both business and access logs
    let console_layer = fmt::layer()
        .with_ansi(config.ansi)
        .event_format(BracketedLevelFormat)
        .boxed();

    // Business file: {service}.log.YYYY-MM-DD
    let business_appender = tracing_appender::rolling::daily(
        &config.log_dir,
        format!("{}.log", config.service_name),
    );
    let (business_writer, business_guard) = tracing_appender::non_blocking(business_appender);
    store_guard(business_guard);

    let business_file_layer = if config.enable_json {
        fmt::layer()
            .json()
            .with_writer(business_writer)
            .with_target(true)
            .with_filter(filter::filter_fn(|metadata| {
                metadata.target() != API_ACCESS_TARGET
            }))
            .boxed()
    } else {
        fmt::layer()
            .with_writer(business_writer)
            .with_ansi(false)
            .event_format(BracketedLevelFormat)
            .with_filter(filter::filter_fn(|metadata| {
                metadata.target() != API_ACCESS_TARGET
            }))
            .boxed()
    };

    // API file: {service}_api.log.YYYY-MM-DD
    let api_file_layer = if config.enable_api_log {
        let api_appender = tracing_appender::rolling::daily(
            &config.log_dir,
            format!("{}_api.log", config.service_name),
        );
        let (api_writer, api_guard) = tracing_appender::non_blocking(api_appender);
        store_guard(api_guard);

        Some(
            fmt::layer()
                .with_writer(api_writer)
                .with_ansi(false)
                .event_format(BracketedLevelFormat)
                .with_filter(filter::filter_fn(|metadata| {
                    metadata.target() == API_ACCESS_TARGET
                }))
                .boxed(),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(business_file_layer)
        .with(api_file_layer)
        .try_init()?;

    tracing::info!("Logging: {} @ {:?}", config.service_name, config.log_dir);
    Ok(())
}

// ============================================================================
// HTTP API Request Logging Middleware
// ============================================================================

/// HTTP API request logger middleware
///
/// Every request is logged to the `api_access` target with method, path,
/// query, status and duration. Server errors are logged at WARN.
///
/// Add this middleware to the router **before** `.with_state()`:
/// ```rust,ignore
/// let app = Router::new()
///     // ... routes ...
///     .layer(axum::middleware::from_fn(common::logging::http_request_logger))
///     .with_state(state);
/// ```
#[cfg(feature = "axum")]
pub async fn http_request_logger(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    use std::time::Instant;
    use tracing::{info, warn};

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or("-").to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        warn!(
            target: "api_access",
            method = %method,
            path = %path,
            query = %query,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "HTTP request"
        );
    } else {
        info!(
            target: "api_access",
            method = %method,
            path = %path,
            query = %query,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "HTTP request"
        );
    }

    response
}
