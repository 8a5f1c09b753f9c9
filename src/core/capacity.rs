use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::primitives::validate_hours;
use crate::error::{WorkloadError, WorkloadResult};

/// Weekday hours indexed from Sunday (`0`) to Saturday (`6`).
pub const DEFAULT_WEEKDAY_HOURS: [f64; 7] = [0.0, 8.0, 8.0, 8.0, 8.0, 8.0, 0.0];

/// Base hours for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityEntry {
    pub weekday: Weekday,
    pub base_hours: f64,
}

/// Hours of absence recorded for a single date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Absence {
    pub date: NaiveDate,
    pub hours: f64,
}

/// Per-resource working capacity: a weekly hour pattern reduced by absences.
///
/// Lookups are total: every date resolves to a finite, non-negative number of
/// hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacitySchedule {
    weekday_hours: [f64; 7],
    #[serde(default)]
    absences: BTreeMap<NaiveDate, f64>,
}

impl Default for CapacitySchedule {
    fn default() -> Self {
        Self {
            weekday_hours: DEFAULT_WEEKDAY_HOURS,
            absences: BTreeMap::new(),
        }
    }
}

impl CapacitySchedule {
    /// Builds a schedule from hours indexed Sunday-first.
    pub fn new(weekday_hours: [f64; 7]) -> WorkloadResult<Self> {
        for hours in weekday_hours {
            validate_hours(hours, "weekday base hours")?;
        }
        Ok(Self {
            weekday_hours,
            absences: BTreeMap::new(),
        })
    }

    /// Builds a schedule from explicit entries; weekdays without an entry get 0 hours.
    pub fn from_entries(entries: &[CapacityEntry]) -> WorkloadResult<Self> {
        let mut weekday_hours = [0.0; 7];
        for entry in entries {
            let index = entry.weekday.num_days_from_sunday() as usize;
            weekday_hours[index] = validate_hours(entry.base_hours, "weekday base hours")?;
        }
        Self::new(weekday_hours)
    }

    /// Same hours on every Monday-Friday, zero on weekends.
    pub fn uniform_workdays(hours: f64) -> WorkloadResult<Self> {
        Self::new([0.0, hours, hours, hours, hours, hours, 0.0])
    }

    /// Records an absence; several absences on one date accumulate.
    pub fn with_absence(mut self, date: NaiveDate, hours: f64) -> WorkloadResult<Self> {
        let hours = validate_hours(hours, "absence hours")?;
        *self.absences.entry(date).or_insert(0.0) += hours;
        Ok(self)
    }

    pub fn with_absences(mut self, absences: &[Absence]) -> WorkloadResult<Self> {
        for absence in absences {
            self = self.with_absence(absence.date, absence.hours)?;
        }
        Ok(self)
    }

    #[must_use]
    pub fn base_hours(&self, weekday: Weekday) -> f64 {
        self.weekday_hours[weekday.num_days_from_sunday() as usize]
    }

    #[must_use]
    pub fn absence_on(&self, date: NaiveDate) -> f64 {
        self.absences.get(&date).copied().unwrap_or(0.0)
    }

    /// Available hours on `date`: weekday base minus absence, floored at 0.
    #[must_use]
    pub fn capacity_on(&self, date: NaiveDate) -> f64 {
        (self.base_hours(date.weekday()) - self.absence_on(date)).max(0.0)
    }

    /// Sum of `capacity_on` over the inclusive range `[from, to]`.
    #[must_use]
    pub fn total_capacity(&self, from: NaiveDate, to: NaiveDate) -> f64 {
        crate::core::primitives::date_range(from, to)
            .map(|date| self.capacity_on(date))
            .sum()
    }

    /// Re-checks invariants for schedules loaded through serde.
    pub fn validate(&self) -> WorkloadResult<()> {
        for hours in self.weekday_hours {
            validate_hours(hours, "weekday base hours")?;
        }
        for (date, hours) in &self.absences {
            if !hours.is_finite() || *hours < 0.0 {
                return Err(WorkloadError::InvalidData(format!(
                    "absence hours on {date} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}
