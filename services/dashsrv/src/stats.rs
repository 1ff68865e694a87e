//! Dashboard summary counters, computed in one pass

use dash_model::{AlarmSeverity, AlarmStats, AlarmUpstream, BatchStats, BatchUpstream, ExecutionStatus};

/// Severity counts over upstream alarms, using the normalized severity
pub fn alarm_stats(alarms: &[AlarmUpstream]) -> AlarmStats {
    alarms.iter().fold(AlarmStats::default(), |mut stats, alarm| {
        let severity = AlarmSeverity::from_upstream(&alarm.severity);
        stats.total += 1;
        match severity {
            AlarmSeverity::Critical => stats.critical += 1,
            AlarmSeverity::Warning => stats.warning += 1,
            AlarmSeverity::Info => stats.info += 1,
        }
        if severity.is_active() {
            stats.active += 1;
        }
        stats
    })
}

/// Execution status counts over upstream batches
///
/// Statuses other than completed, in progress and failed only count
/// towards `total`.
pub fn batch_stats(batches: &[BatchUpstream]) -> BatchStats {
    batches.iter().fold(BatchStats::default(), |mut stats, batch| {
        stats.total += 1;
        match ExecutionStatus::from_upstream(&batch.execution_status) {
            ExecutionStatus::Completed => stats.completed += 1,
            ExecutionStatus::InProgress => stats.in_progress += 1,
            ExecutionStatus::Failed => stats.failed += 1,
            _ => {},
        }
        stats
    })
}
