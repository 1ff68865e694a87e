//! Static substitute data for upstream outages
//!
//! Identical on every call; the record content marks itself as offline data.

use dash_model::{
    Alarm, AlarmSeverity, AlarmStats, AlarmsResponse, Batch, BatchStats, BatchesResponse,
    ExecutionStatus, Page, ProductionStep,
};

pub const FALLBACK_ALARM_MESSAGE: &str = "Backend connection failed - mock data displayed";
const FALLBACK_ALARM_TIMESTAMP: &str = "2025-12-01T16:41:56.392878";

pub fn fallback_alarm() -> Alarm {
    Alarm {
        id: "mock-1".to_string(),
        timestamp: FALLBACK_ALARM_TIMESTAMP.to_string(),
        severity: AlarmSeverity::Warning,
        equipment_id: "REACTOR-A1".to_string(),
        production_step: ProductionStep::Polymerization,
        message: FALLBACK_ALARM_MESSAGE.to_string(),
        batch_id: "BATCH-MOCK-001".to_string(),
    }
}

pub fn fallback_batch() -> Batch {
    Batch {
        batch_id: "00197be5-160e-415e-8bca-5271cb3b3c4d".to_string(),
        batch_number: "BATCH-1000".to_string(),
        production_order_number: "PO-2000".to_string(),
        recipe_id: "RECIPE-015".to_string(),
        planned_start_time: Some("2025-12-01T16:33:56.392878".to_string()),
        actual_start_time: Some("2025-12-01T16:41:56.392878".to_string()),
        planned_end_time: Some("2025-12-01T16:53:56.392878".to_string()),
        actual_end_time: Some("2025-12-01T17:43:56.392878".to_string()),
        execution_status: ExecutionStatus::Completed,
        id: 224,
        name: None,
        line_id: None,
    }
}

pub fn fallback_alarms() -> AlarmsResponse {
    Page::single(fallback_alarm()).into()
}

pub fn fallback_batches() -> BatchesResponse {
    Page::single(fallback_batch()).into()
}

pub fn zero_alarm_stats() -> AlarmStats {
    AlarmStats::default()
}

pub fn zero_batch_stats() -> BatchStats {
    BatchStats::default()
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_fallback_envelopes_hold_one_record() {
        let alarms = fallback_alarms();
        assert_eq!(alarms.alarms.len(), 1);
        assert_eq!((alarms.total, alarms.page, alarms.total_pages), (1, 1, 1));
        assert_eq!(alarms.alarms[0].message, FALLBACK_ALARM_MESSAGE);

        let batches = fallback_batches();
        assert_eq!(batches.batches.len(), 1);
        assert_eq!((batches.total, batches.page, batches.total_pages), (1, 1, 1));
        assert_eq!(batches.batches[0].id, 224);
    }

    #[test]
    fn test_fallback_is_constant() {
        assert_eq!(
            serde_json::to_string(&fallback_alarms()).unwrap(),
            serde_json::to_string(&fallback_alarms()).unwrap()
        );
        assert_eq!(fallback_batches(), fallback_batches());
    }

    #[test]
    fn test_zero_stats() {
        let json = serde_json::to_value(zero_alarm_stats()).unwrap();
        assert_eq!(json["total"], 0);
        assert_eq!(json["active"], 0);
        assert_eq!(zero_batch_stats().in_progress, 0);
    }
}
