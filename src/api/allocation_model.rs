use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{
    DayBucket, ItemIds, Measure, Measures, Resource, SpanCoordinates, TimelineProjector,
    WeekBucket,
};
use crate::error::{WorkloadError, WorkloadResult};
use crate::render::AvailabilityBand;

use super::{ChartWindow, TimelineHeader, ZoomLevel};

/// Calendar extent of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BucketSpan {
    Day { date: NaiveDate },
    Week { start: NaiveDate, end: NaiveDate },
}

impl BucketSpan {
    #[must_use]
    pub fn start(self) -> NaiveDate {
        match self {
            Self::Day { date } => date,
            Self::Week { start, .. } => start,
        }
    }

    #[must_use]
    pub fn end(self) -> NaiveDate {
        match self {
            Self::Day { date } => date,
            Self::Week { end, .. } => end,
        }
    }
}

/// Renderer-facing bucket: allocation totals plus derived measures and pixels.
///
/// `measures`, `value` and `band` are absent for buckets excluded from
/// display (no capacity, or entirely before the reference date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationBucket {
    pub span: BucketSpan,
    pub capacity: f64,
    pub allocated_effort: f64,
    pub contributing_items: ItemIds,
    pub overdue_items: ItemIds,
    pub measures: Option<Measures>,
    pub value: Option<f64>,
    pub band: Option<AvailabilityBand>,
    pub coordinates: SpanCoordinates,
}

impl AllocationBucket {
    pub(crate) fn from_day(
        day: DayBucket,
        reference: NaiveDate,
        measure: Measure,
        projector: TimelineProjector,
    ) -> Self {
        let measurable = day.is_measurable(reference);
        Self::assemble(
            BucketSpan::Day { date: day.date },
            day.capacity,
            day.allocated_effort,
            day.contributing_items,
            day.overdue_items,
            measurable,
            measure,
            projector,
        )
    }

    pub(crate) fn from_week(
        week: WeekBucket,
        reference: NaiveDate,
        measure: Measure,
        projector: TimelineProjector,
    ) -> Self {
        let measurable = week.is_measurable(reference);
        Self::assemble(
            BucketSpan::Week {
                start: week.start,
                end: week.end,
            },
            week.capacity,
            week.allocated_effort,
            week.contributing_items,
            week.overdue_items,
            measurable,
            measure,
            projector,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        span: BucketSpan,
        capacity: f64,
        allocated_effort: f64,
        contributing_items: ItemIds,
        overdue_items: ItemIds,
        measurable: bool,
        measure: Measure,
        projector: TimelineProjector,
    ) -> Self {
        let measures = measurable.then(|| Measures::from_load(capacity, allocated_effort));
        Self {
            span,
            capacity,
            allocated_effort,
            contributing_items,
            overdue_items,
            measures,
            value: measures.map(|measures| measures.value(measure)),
            band: measures.map(|measures| AvailabilityBand::classify(measures.availability_pct)),
            coordinates: projector.project(span.start(), span.end(), None),
        }
    }

    #[must_use]
    pub fn is_displayed(&self) -> bool {
        self.measures.is_some() && self.coordinates.is_visible()
    }

    #[must_use]
    pub fn has_overdue(&self) -> bool {
        !self.overdue_items.is_empty()
    }

    fn validate(&self) -> WorkloadResult<()> {
        let mut hours = vec![self.capacity, self.allocated_effort];
        if let Some(value) = self.value {
            hours.push(value);
        }
        if hours.iter().any(|value| !value.is_finite()) {
            return Err(WorkloadError::InvalidData(format!(
                "bucket starting {} carries non-finite values",
                self.span.start()
            )));
        }
        if !self.coordinates.is_finite() {
            return Err(WorkloadError::InvalidData(format!(
                "bucket starting {} has non-finite coordinates",
                self.span.start()
            )));
        }
        Ok(())
    }
}

/// Allocation result for one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationModel {
    pub resource: Resource,
    pub buckets: Vec<AllocationBucket>,
    /// Set on the row at which the row budget ran out.
    pub truncated: bool,
}

impl AllocationModel {
    pub fn displayed_buckets(&self) -> impl Iterator<Item = &AllocationBucket> {
        self.buckets.iter().filter(|bucket| bucket.is_displayed())
    }

    #[must_use]
    pub fn total_allocated_effort(&self) -> f64 {
        self.buckets
            .iter()
            .map(|bucket| bucket.allocated_effort)
            .sum()
    }
}

/// Complete, format-agnostic output of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadChart {
    pub window: ChartWindow,
    pub zoom: ZoomLevel,
    pub measure: Measure,
    pub reference_date: NaiveDate,
    pub pixels_per_day: f64,
    pub width_px: f64,
    pub header: TimelineHeader,
    pub today_marker_px: Option<f64>,
    pub rows: Vec<AllocationModel>,
    pub truncated: bool,
}

impl WorkloadChart {
    pub fn validate(&self) -> WorkloadResult<()> {
        if !self.pixels_per_day.is_finite() || self.pixels_per_day <= 0.0 {
            return Err(WorkloadError::InvalidScale(self.pixels_per_day));
        }
        if self.window.end < self.window.start {
            return Err(WorkloadError::InvalidWindow {
                start: self.window.start,
                end: self.window.end,
            });
        }
        for row in &self.rows {
            for bucket in &row.buckets {
                bucket.validate()?;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.rows.iter().map(|row| row.buckets.len()).sum()
    }

    pub fn to_json_pretty(&self) -> WorkloadResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(raw: &str) -> WorkloadResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
