//! Dashboard endpoint paths served by the adapter

pub const ALARMS: &str = "/api/alarms";
pub const BATCHES: &str = "/api/batches";
pub const ALARM_STATS: &str = "/api/dashboard/alarm-stats";
pub const BATCH_STATS: &str = "/api/dashboard/batch-stats";
