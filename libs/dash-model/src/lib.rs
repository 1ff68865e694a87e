//! Dashboard data model
//!
//! Shapes shared by the adapter service and the dashboard query client.
//!
//! # Modules
//!
//! - `types`: severities, production steps, batch execution statuses
//! - `records`: upstream input records and normalized dashboard records
//! - `envelope`: paginated response envelopes
//! - `stats`: summary counters
//! - `paths`: endpoint paths of the adapter service
//!
//! # Example
//!
//! ```
//! use dash_model::{AlarmSeverity, total_pages};
//!
//! assert_eq!(AlarmSeverity::from_upstream("Critical"), AlarmSeverity::Critical);
//! assert_eq!(total_pages(25, 20), 2);
//! ```

pub mod envelope;
pub mod paths;
pub mod records;
pub mod stats;
pub mod types;

pub use envelope::{total_pages, AlarmsResponse, BatchesResponse, Page};
pub use records::{Alarm, AlarmUpstream, Batch, BatchUpstream, RecordId, UpstreamBatchRef};
pub use stats::{AlarmStats, BatchStats};
pub use types::{AlarmSeverity, ExecutionStatus, ProductionStep};
