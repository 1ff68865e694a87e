//! Filter state for the alarm and batch tables
//!
//! Categorical fields use the sentinel `all` and text/date fields use the
//! empty string to mean "no constraint". Every state carries `page >= 1` and
//! `limit > 0`.

use std::fmt::Debug;

use dash_model::{AlarmSeverity, ExecutionStatus, ProductionStep};

/// Sentinel for categorical fields
pub const ALL: &str = "all";
pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 20;

/// How a field expresses "no constraint"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Categorical,
    Text,
    Date,
}

impl FieldKind {
    pub fn sentinel(&self) -> &'static str {
        match self {
            FieldKind::Categorical => ALL,
            FieldKind::Text | FieldKind::Date => "",
        }
    }

    /// Whether `value` leaves the field unconstrained
    pub fn is_unset(&self, value: &str) -> bool {
        value.is_empty() || value == self.sentinel()
    }
}

/// A filter form: named fields plus paging
pub trait FilterSet: Clone + Debug + Default + PartialEq + Send + Sync + 'static {
    type Key: Copy + Debug + Eq + Send + Sync + 'static;

    /// Field keys in serialization order
    const KEYS: &'static [Self::Key];

    fn kind(key: Self::Key) -> FieldKind;
    /// Query parameter name
    fn name(key: Self::Key) -> &'static str;
    /// Chip label
    fn label(key: Self::Key) -> &'static str;

    fn get(&self, key: Self::Key) -> &str;
    fn set(&mut self, key: Self::Key, value: String);

    fn page(&self) -> usize;
    fn limit(&self) -> usize;
    fn set_page(&mut self, page: usize);
    fn set_limit(&mut self, limit: usize);

    /// Human readable chip value
    fn display_value(key: Self::Key, raw: &str) -> String {
        let _ = key;
        raw.to_string()
    }
}

/// Partial update of a filter form
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPatch<K> {
    pub fields: Vec<(K, String)>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl<K> Default for FilterPatch<K> {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            page: None,
            limit: None,
        }
    }
}

impl<K> FilterPatch<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: K, value: impl Into<String>) -> Self {
        self.fields.push((key, value.into()));
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One constrained field, as shown in the active-filter chip row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter<K> {
    pub key: K,
    pub label: &'static str,
    pub value: String,
}

// ============================================================================
// Alarm filters
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlarmFilterKey {
    Severity,
    EquipmentId,
    ProductionStep,
    StartDate,
    EndDate,
    BatchId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmFilters {
    pub severity: String,
    pub equipment_id: String,
    pub production_step: String,
    pub start_date: String,
    pub end_date: String,
    pub batch_id: String,
    pub page: usize,
    pub limit: usize,
}

impl Default for AlarmFilters {
    fn default() -> Self {
        Self {
            severity: ALL.to_string(),
            equipment_id: String::new(),
            production_step: ALL.to_string(),
            start_date: String::new(),
            end_date: String::new(),
            batch_id: String::new(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl FilterSet for AlarmFilters {
    type Key = AlarmFilterKey;

    const KEYS: &'static [AlarmFilterKey] = &[
        AlarmFilterKey::Severity,
        AlarmFilterKey::EquipmentId,
        AlarmFilterKey::ProductionStep,
        AlarmFilterKey::StartDate,
        AlarmFilterKey::EndDate,
        AlarmFilterKey::BatchId,
    ];

    fn kind(key: AlarmFilterKey) -> FieldKind {
        match key {
            AlarmFilterKey::Severity | AlarmFilterKey::ProductionStep => FieldKind::Categorical,
            AlarmFilterKey::EquipmentId | AlarmFilterKey::BatchId => FieldKind::Text,
            AlarmFilterKey::StartDate | AlarmFilterKey::EndDate => FieldKind::Date,
        }
    }

    fn name(key: AlarmFilterKey) -> &'static str {
        match key {
            AlarmFilterKey::Severity => "severity",
            AlarmFilterKey::EquipmentId => "equipment_id",
            AlarmFilterKey::ProductionStep => "production_step",
            AlarmFilterKey::StartDate => "start_date",
            AlarmFilterKey::EndDate => "end_date",
            AlarmFilterKey::BatchId => "batch_id",
        }
    }

    fn label(key: AlarmFilterKey) -> &'static str {
        match key {
            AlarmFilterKey::Severity => "Severity",
            AlarmFilterKey::EquipmentId => "Equipment",
            AlarmFilterKey::ProductionStep => "Production Step",
            AlarmFilterKey::StartDate => "Start Date",
            AlarmFilterKey::EndDate => "End Date",
            AlarmFilterKey::BatchId => "Batch ID",
        }
    }

    fn get(&self, key: AlarmFilterKey) -> &str {
        match key {
            AlarmFilterKey::Severity => &self.severity,
            AlarmFilterKey::EquipmentId => &self.equipment_id,
            AlarmFilterKey::ProductionStep => &self.production_step,
            AlarmFilterKey::StartDate => &self.start_date,
            AlarmFilterKey::EndDate => &self.end_date,
            AlarmFilterKey::BatchId => &self.batch_id,
        }
    }

    fn set(&mut self, key: AlarmFilterKey, value: String) {
        let slot = match key {
            AlarmFilterKey::Severity => &mut self.severity,
            AlarmFilterKey::EquipmentId => &mut self.equipment_id,
            AlarmFilterKey::ProductionStep => &mut self.production_step,
            AlarmFilterKey::StartDate => &mut self.start_date,
            AlarmFilterKey::EndDate => &mut self.end_date,
            AlarmFilterKey::BatchId => &mut self.batch_id,
        };
        *slot = value;
    }

    fn page(&self) -> usize {
        self.page
    }

    fn limit(&self) -> usize {
        self.limit
    }

    fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    fn display_value(key: AlarmFilterKey, raw: &str) -> String {
        match key {
            AlarmFilterKey::Severity => raw
                .parse::<AlarmSeverity>()
                .map(|s| s.upstream_name().to_string())
                .unwrap_or_else(|_| raw.to_string()),
            AlarmFilterKey::ProductionStep => raw
                .parse::<ProductionStep>()
                .map(|s| s.label().to_string())
                .unwrap_or_else(|_| raw.to_string()),
            _ => raw.to_string(),
        }
    }
}

// ============================================================================
// Batch filters
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchFilterKey {
    ExecutionStatus,
    BatchNumber,
    ProductionOrderNumber,
    RecipeId,
    StartDate,
    EndDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFilters {
    pub execution_status: String,
    pub batch_number: String,
    pub production_order_number: String,
    pub recipe_id: String,
    pub start_date: String,
    pub end_date: String,
    pub page: usize,
    pub limit: usize,
}

impl Default for BatchFilters {
    fn default() -> Self {
        Self {
            execution_status: ALL.to_string(),
            batch_number: String::new(),
            production_order_number: String::new(),
            recipe_id: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl FilterSet for BatchFilters {
    type Key = BatchFilterKey;

    const KEYS: &'static [BatchFilterKey] = &[
        BatchFilterKey::ExecutionStatus,
        BatchFilterKey::BatchNumber,
        BatchFilterKey::ProductionOrderNumber,
        BatchFilterKey::RecipeId,
        BatchFilterKey::StartDate,
        BatchFilterKey::EndDate,
    ];

    fn kind(key: BatchFilterKey) -> FieldKind {
        match key {
            BatchFilterKey::ExecutionStatus => FieldKind::Categorical,
            BatchFilterKey::BatchNumber
            | BatchFilterKey::ProductionOrderNumber
            | BatchFilterKey::RecipeId => FieldKind::Text,
            BatchFilterKey::StartDate | BatchFilterKey::EndDate => FieldKind::Date,
        }
    }

    fn name(key: BatchFilterKey) -> &'static str {
        match key {
            BatchFilterKey::ExecutionStatus => "execution_status",
            BatchFilterKey::BatchNumber => "batch_number",
            BatchFilterKey::ProductionOrderNumber => "production_order_number",
            BatchFilterKey::RecipeId => "recipe_id",
            BatchFilterKey::StartDate => "start_date",
            BatchFilterKey::EndDate => "end_date",
        }
    }

    fn label(key: BatchFilterKey) -> &'static str {
        match key {
            BatchFilterKey::ExecutionStatus => "Status",
            BatchFilterKey::BatchNumber => "Batch Number",
            BatchFilterKey::ProductionOrderNumber => "Production Order",
            BatchFilterKey::RecipeId => "Recipe",
            BatchFilterKey::StartDate => "Start Date",
            BatchFilterKey::EndDate => "End Date",
        }
    }

    fn get(&self, key: BatchFilterKey) -> &str {
        match key {
            BatchFilterKey::ExecutionStatus => &self.execution_status,
            BatchFilterKey::BatchNumber => &self.batch_number,
            BatchFilterKey::ProductionOrderNumber => &self.production_order_number,
            BatchFilterKey::RecipeId => &self.recipe_id,
            BatchFilterKey::StartDate => &self.start_date,
            BatchFilterKey::EndDate => &self.end_date,
        }
    }

    fn set(&mut self, key: BatchFilterKey, value: String) {
        let slot = match key {
            BatchFilterKey::ExecutionStatus => &mut self.execution_status,
            BatchFilterKey::BatchNumber => &mut self.batch_number,
            BatchFilterKey::ProductionOrderNumber => &mut self.production_order_number,
            BatchFilterKey::RecipeId => &mut self.recipe_id,
            BatchFilterKey::StartDate => &mut self.start_date,
            BatchFilterKey::EndDate => &mut self.end_date,
        };
        *slot = value;
    }

    fn page(&self) -> usize {
        self.page
    }

    fn limit(&self) -> usize {
        self.limit
    }

    fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    fn display_value(key: BatchFilterKey, raw: &str) -> String {
        match key {
            BatchFilterKey::ExecutionStatus => raw
                .parse::<ExecutionStatus>()
                .map(|s| s.label().to_string())
                .unwrap_or_else(|_| raw.to_string()),
            _ => raw.to_string(),
        }
    }
}
