//! Categorical domain types for alarms and batches

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Alarm severity
// ============================================================================

/// Normalized alarm severity
///
/// The upstream backend reports `Critical`, `Warning` or `Info`; the dashboard
/// uses the lowercase form. Anything else coming from upstream is `Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AlarmSeverity {
    Critical,
    Warning,
    Info,
}

impl AlarmSeverity {
    pub const ALL: [AlarmSeverity; 3] = [
        AlarmSeverity::Critical,
        AlarmSeverity::Warning,
        AlarmSeverity::Info,
    ];

    /// Lowercase dashboard name
    pub fn as_str(&self) -> &'static str {
        match self {
            AlarmSeverity::Critical => "critical",
            AlarmSeverity::Warning => "warning",
            AlarmSeverity::Info => "info",
        }
    }

    /// Name the upstream backend uses for this severity
    ///
    /// # Examples
    /// ```
    /// # use dash_model::AlarmSeverity;
    /// assert_eq!(AlarmSeverity::Critical.upstream_name(), "Critical");
    /// ```
    pub fn upstream_name(&self) -> &'static str {
        match self {
            AlarmSeverity::Critical => "Critical",
            AlarmSeverity::Warning => "Warning",
            AlarmSeverity::Info => "Info",
        }
    }

    /// Map an upstream severity string, defaulting unknown values to `Info`
    pub fn from_upstream(raw: &str) -> Self {
        raw.parse().unwrap_or(AlarmSeverity::Info)
    }

    /// Whether an alarm of this severity counts as active
    pub fn is_active(&self) -> bool {
        !matches!(self, AlarmSeverity::Info)
    }
}

impl FromStr for AlarmSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(AlarmSeverity::Critical),
            "warning" => Ok(AlarmSeverity::Warning),
            "info" => Ok(AlarmSeverity::Info),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

impl fmt::Display for AlarmSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Production step
// ============================================================================

/// Plant production step an alarm is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ProductionStep {
    Polymerization,
    Mixing,
    Drying,
    Packaging,
    Qa,
}

impl ProductionStep {
    /// Steps in line order; index + 1 is the upstream step number
    pub const ALL: [ProductionStep; 5] = [
        ProductionStep::Polymerization,
        ProductionStep::Mixing,
        ProductionStep::Drying,
        ProductionStep::Packaging,
        ProductionStep::Qa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductionStep::Polymerization => "polymerization",
            ProductionStep::Mixing => "mixing",
            ProductionStep::Drying => "drying",
            ProductionStep::Packaging => "packaging",
            ProductionStep::Qa => "qa",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            ProductionStep::Polymerization => "Polymerization",
            ProductionStep::Mixing => "Mixing",
            ProductionStep::Drying => "Drying",
            ProductionStep::Packaging => "Packaging",
            ProductionStep::Qa => "Quality Assurance",
        }
    }

    /// Upstream step number (1-based)
    pub fn step_number(&self) -> u32 {
        match self {
            ProductionStep::Polymerization => 1,
            ProductionStep::Mixing => 2,
            ProductionStep::Drying => 3,
            ProductionStep::Packaging => 4,
            ProductionStep::Qa => 5,
        }
    }

    /// Step for an upstream step number, if it is on the line
    pub fn from_step_number(number: i64) -> Option<Self> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        Self::ALL.get(index).copied()
    }
}

impl FromStr for ProductionStep {
    type Err = String;

    /// Accepts a step name (`mixing`) or an upstream step reference (`step-2`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if let Some(number) = lowered.strip_prefix("step-") {
            return number
                .parse::<i64>()
                .ok()
                .and_then(Self::from_step_number)
                .ok_or_else(|| format!("unknown production step '{}'", s));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|step| step.as_str() == lowered)
            .ok_or_else(|| format!("unknown production step '{}'", s))
    }
}

impl fmt::Display for ProductionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Batch execution status
// ============================================================================

/// Batch execution status as reported by the upstream backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Completed,
    InProgress,
    Running,
    Planned,
    Scheduled,
    Aborted,
    Failed,
}

impl ExecutionStatus {
    pub const ALL: [ExecutionStatus; 7] = [
        ExecutionStatus::Completed,
        ExecutionStatus::InProgress,
        ExecutionStatus::Running,
        ExecutionStatus::Planned,
        ExecutionStatus::Scheduled,
        ExecutionStatus::Aborted,
        ExecutionStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Completed => "COMPLETED",
            ExecutionStatus::InProgress => "IN_PROGRESS",
            ExecutionStatus::Running => "RUNNING",
            ExecutionStatus::Planned => "PLANNED",
            ExecutionStatus::Scheduled => "SCHEDULED",
            ExecutionStatus::Aborted => "ABORTED",
            ExecutionStatus::Failed => "FAILED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExecutionStatus::Completed => "Completed",
            ExecutionStatus::InProgress => "In Progress",
            ExecutionStatus::Running => "Running",
            ExecutionStatus::Planned => "Planned",
            ExecutionStatus::Scheduled => "Scheduled",
            ExecutionStatus::Aborted => "Aborted",
            ExecutionStatus::Failed => "Failed",
        }
    }

    /// Map an upstream status string; unknown values become `Planned`
    pub fn from_upstream(raw: &str) -> Self {
        raw.parse().unwrap_or(ExecutionStatus::Planned)
    }
}

impl FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == upper)
            .ok_or_else(|| format!("unknown execution status '{}'", s))
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
