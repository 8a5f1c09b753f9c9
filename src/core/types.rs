use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{decimal_to_f64, validate_hours};
use crate::error::{WorkloadError, WorkloadResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resource#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkItemId(pub u64);

impl fmt::Display for WorkItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// A person work items are assigned to.
///
/// `display_key` is the stable ordering key used by directories (surname in
/// most deployments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub display_key: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Resource {
    #[must_use]
    pub fn new(id: ResourceId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            display_key: name.clone(),
            name,
            active: true,
        }
    }

    #[must_use]
    pub fn with_display_key(mut self, key: impl Into<String>) -> Self {
        self.display_key = key.into();
        self
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Schedulable unit of work, read-only to the engine.
///
/// Effort values are validated on construction so they are never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: WorkItemId,
    pub assignee: ResourceId,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub spent_hours: f64,
    #[serde(default)]
    pub descendants: Vec<WorkItemId>,
    /// Completion percentage in `[0, 100]`, used for timeline progress bars.
    #[serde(default)]
    pub done_ratio: Option<f64>,
}

impl WorkItem {
    #[must_use]
    pub fn new(id: WorkItemId, assignee: ResourceId) -> Self {
        Self {
            id,
            assignee,
            start_date: None,
            due_date: None,
            estimated_hours: 0.0,
            spent_hours: 0.0,
            descendants: Vec::new(),
            done_ratio: None,
        }
    }

    #[must_use]
    pub fn with_dates(mut self, start: Option<NaiveDate>, due: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.due_date = due;
        self
    }

    /// Sets estimated/spent effort in hours.
    pub fn with_effort(mut self, estimated_hours: f64, spent_hours: f64) -> WorkloadResult<Self> {
        self.estimated_hours = validate_hours(estimated_hours, "estimated_hours")?;
        self.spent_hours = validate_hours(spent_hours, "spent_hours")?;
        Ok(self)
    }

    /// Converts decimal effort as stored by time-tracking backends.
    pub fn with_decimal_effort(self, estimated: Decimal, spent: Decimal) -> WorkloadResult<Self> {
        let estimated = decimal_to_f64(estimated, "estimated_hours")?;
        let spent = decimal_to_f64(spent, "spent_hours")?;
        self.with_effort(estimated, spent)
    }

    #[must_use]
    pub fn with_descendants(mut self, descendants: impl IntoIterator<Item = WorkItemId>) -> Self {
        self.descendants = descendants.into_iter().collect();
        self
    }

    pub fn with_done_ratio(mut self, done_ratio: f64) -> WorkloadResult<Self> {
        if !done_ratio.is_finite() || !(0.0..=100.0).contains(&done_ratio) {
            return Err(WorkloadError::InvalidData(
                "done_ratio must be finite and within [0, 100]".to_owned(),
            ));
        }
        self.done_ratio = Some(done_ratio);
        Ok(self)
    }

    /// `true` when the due date precedes `reference`. Items without a due
    /// date are never overdue.
    #[must_use]
    pub fn is_overdue(&self, reference: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due < reference)
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.descendants.is_empty()
    }

    /// Re-checks invariants for items that bypassed the builders (serde input).
    pub fn validate(&self) -> WorkloadResult<()> {
        validate_hours(self.estimated_hours, "estimated_hours")?;
        validate_hours(self.spent_hours, "spent_hours")?;
        if let Some(ratio) = self.done_ratio {
            if !ratio.is_finite() || !(0.0..=100.0).contains(&ratio) {
                return Err(WorkloadError::InvalidData(format!(
                    "{} done_ratio must be finite and within [0, 100]",
                    self.id
                )));
            }
        }
        Ok(())
    }
}
