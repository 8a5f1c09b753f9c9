use serde::{Deserialize, Serialize};

/// Indicator selected for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Measure {
    PlannedCapacity,
    FreeCapacity,
    Workload,
    #[default]
    Availability,
}

impl Measure {
    pub const ALL: [Measure; 4] = [
        Measure::PlannedCapacity,
        Measure::FreeCapacity,
        Measure::Workload,
        Measure::Availability,
    ];

    /// `true` for the percentage measures.
    #[must_use]
    pub fn is_percentage(self) -> bool {
        matches!(self, Measure::Workload | Measure::Availability)
    }
}

/// Normalized capacity/workload indicators for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measures {
    pub planned_capacity: f64,
    pub free_capacity: f64,
    pub workload_pct: f64,
    pub availability_pct: f64,
}

impl Measures {
    /// Derives all four measures; zero capacity yields 0 for both percentages.
    #[must_use]
    pub fn from_load(capacity: f64, allocated_effort: f64) -> Self {
        let workload_pct = if capacity == 0.0 {
            0.0
        } else {
            allocated_effort / capacity * 100.0
        };
        let availability_pct = if capacity == 0.0 {
            0.0
        } else {
            100.0 - workload_pct
        };

        Self {
            planned_capacity: allocated_effort,
            free_capacity: capacity - allocated_effort,
            workload_pct,
            availability_pct,
        }
    }

    #[must_use]
    pub fn value(self, measure: Measure) -> f64 {
        match measure {
            Measure::PlannedCapacity => self.planned_capacity,
            Measure::FreeCapacity => self.free_capacity,
            Measure::Workload => self.workload_pct,
            Measure::Availability => self.availability_pct,
        }
    }
}
