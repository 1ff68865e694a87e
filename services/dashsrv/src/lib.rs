//! Dashboard adapter service
//!
//! Bridges the plant backend to the dashboard's alarm and batch tables:
//! fetches upstream collections, remaps them, applies the filters the
//! backend lacks, sorts and paginates. Upstream failures are answered with
//! static fallback data.

pub mod api;
pub mod config;
pub mod error;
pub mod fallback;
pub mod filter;
pub mod paginate;
pub mod pipeline;
pub mod remap;
pub mod stats;
pub mod upstream;

use std::sync::Arc;
use std::time::Instant;

pub use config::DashConfig;
pub use error::{AdapterError, Result};
pub use upstream::{HttpUpstream, UpstreamSource};

/// Application state
///
/// Read-only after startup; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashConfig>,
    pub upstream: Arc<dyn UpstreamSource>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: DashConfig, upstream: Arc<dyn UpstreamSource>) -> Self {
        Self {
            config: Arc::new(config),
            upstream,
            started_at: Instant::now(),
        }
    }

    /// State backed by the HTTP upstream named in `config`
    pub fn from_config(config: DashConfig) -> Result<Self> {
        let upstream = HttpUpstream::new(&config.upstream)?;
        Ok(Self::new(config, Arc::new(upstream)))
    }
}
