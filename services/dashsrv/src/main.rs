//! Dashboard Adapter Service (DashSrv)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use common::service_bootstrap::{
    get_service_port, init_logging, load_development_env, print_startup_banner,
};
use common::shutdown::wait_for_shutdown;
use common::{ServiceArgs, ServiceInfo};
use dash_model::paths;
use dashsrv::api::create_router;
use dashsrv::config::DEFAULT_PORT;
use dashsrv::{AppState, DashConfig};

#[derive(Parser, Debug)]
#[command(name = "dashsrv", version, about = "Dashboard adapter service")]
struct Args {
    /// Configuration file (defaults to config/dashsrv.yaml or dashsrv.yaml)
    #[arg(short, long, env = "DASHSRV_CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    service: ServiceArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    load_development_env();
    let args = Args::parse();

    let config = DashConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let service_args = &args.service;

    let service_info = ServiceInfo::new(
        "dashsrv",
        "Dashboard adapter for alarm and batch tables",
        DEFAULT_PORT,
    );
    init_logging(
        &service_info,
        config.logging.dir.as_deref(),
        service_args.parse_log_level(&config.logging.level),
        !service_args.no_color,
    )?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    if service_args.validate {
        info!("Configuration is valid");
        return Ok(());
    }

    print_startup_banner(&service_info);

    let (host, port) = match service_args.bind_override() {
        Some(bind) => bind,
        None => (
            config.api.host.clone(),
            get_service_port(config.api.port, &service_info),
        ),
    };
    let addr = format!("{}:{}", host, port);

    info!("Upstream backend: {}", config.upstream.base_url);
    let state = AppState::from_config(config).context("Failed to create upstream client")?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("DashSrv started on {}", addr);
    info!("API endpoints:");
    info!("  GET {} - Alarm table", paths::ALARMS);
    info!("  GET {} - Batch table", paths::BATCHES);
    info!("  GET {} - Alarm severity counts", paths::ALARM_STATS);
    info!("  GET {} - Batch status counts", paths::BATCH_STATS);
    info!("  GET /health - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    info!("DashSrv stopped");
    Ok(())
}
