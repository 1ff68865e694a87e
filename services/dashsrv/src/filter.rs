//! Secondary filtering of remapped records
//!
//! Every requested filter is applied locally, including the ones already
//! forwarded to the backend, so the result does not depend on how much of
//! the query the backend honoured.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use dash_model::{Alarm, AlarmSeverity, Batch, ExecutionStatus, ProductionStep};

use crate::api::models::{AlarmQuery, BatchQuery};

/// Sentinel meaning "no constraint" for categorical parameters
pub const ALL: &str = "all";

/// The constraining value of a query parameter, if any
pub fn constraint(value: Option<&str>) -> Option<&str> {
    let value = value?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
        None
    } else {
        Some(value)
    }
}

/// Parse a record timestamp
///
/// RFC 3339 values are compared in UTC; naive values are taken as written.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Calendar day of a date filter value (`2025-11-01` or a full timestamp)
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw).map(|dt| dt.date()))
}

/// Inclusive day range from `start_date`/`end_date`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    /// Unparseable bounds are dropped
    pub fn from_filters(start: Option<&str>, end: Option<&str>) -> Self {
        let start = constraint(start).and_then(|raw| {
            let day = parse_day(raw);
            if day.is_none() {
                debug!("Ignoring unparseable start_date filter '{}'", raw);
            }
            day.and_then(|d| d.and_hms_opt(0, 0, 0))
        });
        let end = constraint(end).and_then(|raw| {
            let day = parse_day(raw);
            if day.is_none() {
                debug!("Ignoring unparseable end_date filter '{}'", raw);
            }
            day.and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
        });
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether a record timestamp lies in the range
    ///
    /// Missing or unparseable timestamps only pass an unbounded range.
    pub fn contains(&self, timestamp: Option<&str>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(ts) = timestamp.and_then(parse_timestamp) else {
            return false;
        };
        self.start.map_or(true, |start| ts >= start) && self.end.map_or(true, |end| ts <= end)
    }
}

/// Lowercased needle for a case-insensitive substring filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch(String);

impl TextMatch {
    pub fn parse(value: Option<&str>) -> Option<Self> {
        constraint(value).map(|v| TextMatch(v.to_lowercase()))
    }

    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0)
    }
}

/// Exact-match filter on an enumerated field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Categorical<T> {
    Any,
    Is(T),
    /// Requested value is not a known variant
    Nothing,
}

impl<T: PartialEq + Copy> Categorical<T> {
    pub fn accepts(&self, value: T) -> bool {
        match self {
            Categorical::Any => true,
            Categorical::Is(wanted) => *wanted == value,
            Categorical::Nothing => false,
        }
    }

    pub fn value(&self) -> Option<T> {
        match self {
            Categorical::Is(v) => Some(*v),
            _ => None,
        }
    }
}

/// Resolved alarm filters
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmCriteria {
    pub severity: Categorical<AlarmSeverity>,
    pub production_step: Categorical<ProductionStep>,
    pub equipment_id: Option<TextMatch>,
    pub batch_id: Option<TextMatch>,
    pub range: DateRange,
}

impl AlarmCriteria {
    /// Unknown severity or step values are ignored
    pub fn from_query(query: &AlarmQuery) -> Self {
        Self {
            severity: constraint(query.severity.as_deref())
                .and_then(|s| s.parse().ok())
                .map_or(Categorical::Any, Categorical::Is),
            production_step: constraint(query.production_step.as_deref())
                .and_then(|s| s.parse().ok())
                .map_or(Categorical::Any, Categorical::Is),
            equipment_id: TextMatch::parse(query.equipment_id.as_deref()),
            batch_id: TextMatch::parse(query.batch_id.as_deref()),
            range: DateRange::from_filters(query.start_date.as_deref(), query.end_date.as_deref()),
        }
    }

    pub fn matches(&self, alarm: &Alarm) -> bool {
        self.severity.accepts(alarm.severity)
            && self.production_step.accepts(alarm.production_step)
            && self.equipment_id.as_ref().map_or(true, |m| m.matches(&alarm.equipment_id))
            && self.batch_id.as_ref().map_or(true, |m| m.matches(&alarm.batch_id))
            && self.range.contains(Some(&alarm.timestamp))
    }
}

/// Resolved batch filters
#[derive(Debug, Clone, PartialEq)]
pub struct BatchCriteria {
    pub execution_status: Categorical<ExecutionStatus>,
    pub batch_number: Option<TextMatch>,
    pub production_order_number: Option<TextMatch>,
    pub recipe_id: Option<TextMatch>,
    pub range: DateRange,
}

impl BatchCriteria {
    /// An unknown status matches no batch
    pub fn from_query(query: &BatchQuery) -> Self {
        let execution_status: Categorical<ExecutionStatus> =
            match constraint(query.execution_status.as_deref()) {
                None => Categorical::Any,
                Some(raw) => raw.parse().map_or(Categorical::Nothing, Categorical::Is),
            };
        Self {
            execution_status,
            batch_number: TextMatch::parse(query.batch_number.as_deref()),
            production_order_number: TextMatch::parse(query.production_order_number.as_deref()),
            recipe_id: TextMatch::parse(query.recipe_id.as_deref()),
            range: DateRange::from_filters(query.start_date.as_deref(), query.end_date.as_deref()),
        }
    }

    pub fn matches(&self, batch: &Batch) -> bool {
        self.execution_status.accepts(batch.execution_status)
            && self.batch_number.as_ref().map_or(true, |m| m.matches(&batch.batch_number))
            && self
                .production_order_number
                .as_ref()
                .map_or(true, |m| m.matches(&batch.production_order_number))
            && self.recipe_id.as_ref().map_or(true, |m| m.matches(&batch.recipe_id))
            && self.range.contains(batch.actual_start_time.as_deref())
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    fn alarm(severity: AlarmSeverity, equipment: &str, timestamp: &str) -> Alarm {
        Alarm {
            id: "1".into(),
            timestamp: timestamp.into(),
            severity,
            equipment_id: equipment.into(),
            production_step: ProductionStep::Mixing,
            message: "Vibration levels abnormal".into(),
            batch_id: "BATCH-2024-001".into(),
        }
    }

    fn batch(status: ExecutionStatus, recipe: &str, start: Option<&str>) -> Batch {
        Batch {
            batch_id: "b".into(),
            batch_number: "BATCH-1000".into(),
            production_order_number: "PO-2000".into(),
            recipe_id: recipe.into(),
            planned_start_time: None,
            actual_start_time: start.map(str::to_string),
            planned_end_time: None,
            actual_end_time: None,
            execution_status: status,
            id: 1,
            name: None,
            line_id: None,
        }
    }

    #[test]
    fn test_constraint_skips_sentinels() {
        assert_eq!(constraint(None), None);
        assert_eq!(constraint(Some("")), None);
        assert_eq!(constraint(Some("  ")), None);
        assert_eq!(constraint(Some("all")), None);
        assert_eq!(constraint(Some("ALL")), None);
        assert_eq!(constraint(Some(" mixer ")), Some("mixer"));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 12, 1)
            .unwrap()
            .and_hms_micro_opt(16, 41, 56, 392_878)
            .unwrap();
        assert_eq!(parse_timestamp("2025-12-01T16:41:56.392878"), Some(expected));
        assert_eq!(parse_timestamp("2025-12-01T17:41:56.392878+01:00"), Some(expected));
        assert!(parse_timestamp("2025-12-01 08:00:00").is_some());
        assert!(parse_timestamp("2025-12-01").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_date_range_is_inclusive_by_day() {
        let range = DateRange::from_filters(Some("2025-11-01"), Some("2025-11-02"));
        assert!(range.contains(Some("2025-11-01T00:00:00")));
        assert!(range.contains(Some("2025-11-02T23:59:59.999")));
        assert!(!range.contains(Some("2025-11-03T00:00:00")));
        assert!(!range.contains(Some("2025-10-31T23:59:59")));
        assert!(!range.contains(Some("garbage")));
        assert!(!range.contains(None));
    }

    #[test]
    fn test_unparseable_filter_dates_are_ignored() {
        let range = DateRange::from_filters(Some("someday"), Some(""));
        assert!(range.is_unbounded());
        assert!(range.contains(None));
    }

    #[test]
    fn test_alarm_text_filters_are_case_insensitive() {
        let query = AlarmQuery {
            equipment_id: Some("reactor".into()),
            batch_id: Some("2024".into()),
            ..Default::default()
        };
        let criteria = AlarmCriteria::from_query(&query);
        assert!(criteria.matches(&alarm(AlarmSeverity::Info, "REACTOR-A1", "2025-11-01T10:00:00")));
        assert!(!criteria.matches(&alarm(AlarmSeverity::Info, "MIXER-C3", "2025-11-01T10:00:00")));
    }

    #[test]
    fn test_alarm_severity_exact_and_unknown_ignored() {
        let critical = AlarmCriteria::from_query(&AlarmQuery {
            severity: Some("critical".into()),
            ..Default::default()
        });
        assert!(critical.matches(&alarm(AlarmSeverity::Critical, "QA-F1", "")));
        assert!(!critical.matches(&alarm(AlarmSeverity::Warning, "QA-F1", "")));

        let unknown = AlarmCriteria::from_query(&AlarmQuery {
            severity: Some("fatal".into()),
            ..Default::default()
        });
        assert_eq!(unknown.severity, Categorical::Any);
        assert!(unknown.matches(&alarm(AlarmSeverity::Warning, "QA-F1", "")));
    }

    #[test]
    fn test_alarm_step_filter_accepts_step_reference() {
        let criteria = AlarmCriteria::from_query(&AlarmQuery {
            production_step: Some("step-2".into()),
            ..Default::default()
        });
        assert_eq!(criteria.production_step, Categorical::Is(ProductionStep::Mixing));
    }

    #[test]
    fn test_batch_status_unknown_matches_nothing() {
        let criteria = BatchCriteria::from_query(&BatchQuery {
            execution_status: Some("PAUSED".into()),
            ..Default::default()
        });
        assert!(!criteria.matches(&batch(ExecutionStatus::Completed, "RECIPE-015", None)));

        let criteria = BatchCriteria::from_query(&BatchQuery {
            execution_status: Some("in_progress".into()),
            ..Default::default()
        });
        assert!(criteria.matches(&batch(ExecutionStatus::InProgress, "RECIPE-015", None)));
        assert!(!criteria.matches(&batch(ExecutionStatus::Failed, "RECIPE-015", None)));
    }

    #[test]
    fn test_batch_date_uses_actual_start() {
        let criteria = BatchCriteria::from_query(&BatchQuery {
            start_date: Some("2025-12-01".into()),
            recipe_id: Some("recipe-0".into()),
            ..Default::default()
        });
        assert!(criteria.matches(&batch(
            ExecutionStatus::Completed,
            "RECIPE-015",
            Some("2025-12-01T16:41:56.392878")
        )));
        assert!(!criteria.matches(&batch(ExecutionStatus::Completed, "RECIPE-015", None)));
        assert!(!criteria.matches(&batch(
            ExecutionStatus::Completed,
            "RECIPE-015",
            Some("2025-11-30T23:00:00")
        )));
    }
}
