//! PlantOps basic library
//!
//! Provides functions shared by the dashboard services:
//! - logging (console, rolling files, HTTP access log)
//! - service bootstrap and command-line arguments
//! - configuration priority helpers
//! - health-check API models
//! - graceful shutdown

pub mod api_types;
pub mod bootstrap_args;
pub mod config_loader;
pub mod logging;
pub mod service_bootstrap;
pub mod shutdown;

pub use api_types::{ComponentHealth, HealthStatus, ServiceStatus};
pub use bootstrap_args::ServiceArgs;
pub use service_bootstrap::ServiceInfo;
