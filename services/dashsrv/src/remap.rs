//! Upstream → dashboard record remapping
//!
//! Pure and deterministic: the same upstream record always yields the same
//! dashboard record. Alarm fields the backend does not carry are looked up
//! in fixed tables keyed by the alarm id.

use dash_model::{
    Alarm, AlarmSeverity, AlarmUpstream, Batch, BatchUpstream, ExecutionStatus, ProductionStep,
};

pub const EQUIPMENT_IDS: [&str; 6] = [
    "REACTOR-A1",
    "REACTOR-B2",
    "MIXER-C3",
    "DRYER-D1",
    "PACKAGE-E2",
    "QA-F1",
];

pub const ALARM_MESSAGES: [&str; 10] = [
    "Temperature exceeded threshold",
    "Pressure sensor malfunction detected",
    "Flow rate below minimum requirement",
    "Equipment maintenance required",
    "Quality parameter out of range",
    "Vibration levels abnormal",
    "Chemical composition variance detected",
    "Safety interlock activated",
    "Process timing exceeded limits",
    "Material shortage detected",
];

const BATCH_REF_LEN: usize = 8;

/// Index into a lookup table of `len` entries for an alarm id
fn slot(id: i64, len: usize) -> usize {
    id.rem_euclid(len as i64) as usize
}

pub fn equipment_for(id: i64) -> &'static str {
    EQUIPMENT_IDS[slot(id, EQUIPMENT_IDS.len())]
}

pub fn message_for(id: i64) -> &'static str {
    ALARM_MESSAGES[slot(id, ALARM_MESSAGES.len())]
}

/// Production step: the backend's step number when it is on the line,
/// otherwise the id-keyed lookup
pub fn production_step_for(id: i64, upstream_step: Option<i64>) -> ProductionStep {
    upstream_step
        .and_then(ProductionStep::from_step_number)
        .unwrap_or(ProductionStep::ALL[slot(id, ProductionStep::ALL.len())])
}

/// `BATCH-` plus the first eight characters of the first linked batch, or a
/// synthetic `BATCH-2024-NNN` when the alarm has none
pub fn batch_id_for(alarm: &AlarmUpstream) -> String {
    match alarm.batches.first() {
        Some(batch) => {
            let id = batch.id.to_string();
            let short: String = id.chars().take(BATCH_REF_LEN).collect();
            format!("BATCH-{}", short)
        },
        None => format!("BATCH-2024-{:03}", alarm.id),
    }
}

pub fn remap_alarm(alarm: &AlarmUpstream) -> Alarm {
    Alarm {
        id: alarm.id.to_string(),
        timestamp: alarm.start_date.clone(),
        severity: AlarmSeverity::from_upstream(&alarm.severity),
        equipment_id: equipment_for(alarm.id).to_string(),
        production_step: production_step_for(alarm.id, alarm.production_step),
        message: message_for(alarm.id).to_string(),
        batch_id: batch_id_for(alarm),
    }
}

pub fn remap_batch(batch: &BatchUpstream) -> Batch {
    Batch {
        batch_id: batch.batch_id.clone(),
        batch_number: batch.batch_number.clone(),
        production_order_number: batch.production_order_number.clone(),
        recipe_id: batch.recipe_id.clone(),
        planned_start_time: batch.planned_start_time.clone(),
        actual_start_time: batch.actual_start_time.clone(),
        planned_end_time: batch.planned_end_time.clone(),
        actual_end_time: batch.actual_end_time.clone(),
        execution_status: ExecutionStatus::from_upstream(&batch.execution_status),
        id: batch.internal_id,
        name: batch.name.clone(),
        line_id: None,
    }
}
