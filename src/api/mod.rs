mod allocation_model;
mod engine_config;
mod providers;
mod row_budget;
mod timeline_header;

pub use allocation_model::{AllocationBucket, AllocationModel, BucketSpan, WorkloadChart};
pub use engine_config::{
    BucketMode, ChartWindow, DEFAULT_WINDOW_MONTHS, MAX_WINDOW_MONTHS, MIN_WINDOW_MONTHS,
    WorkloadConfig, ZoomLevel,
};
pub use providers::{
    CapacityScheduleProvider, InMemoryDirectory, ResourceProvider, WorkItemProvider,
};
pub use row_budget::{RowBudget, should_stop};
pub use timeline_header::{DayHeaderCell, HeaderCell, TimelineHeader};

#[cfg(feature = "parallel-allocation")]
use rayon::prelude::*;
use chrono::NaiveDate;
use tracing::debug;

use crate::core::{
    CapacitySchedule, EffortAllocator, Resource, TimelineProjector, WorkItem, aggregate_weeks,
};
use crate::error::WorkloadResult;

/// Entry point: turns providers' data into a `WorkloadChart`.
///
/// The engine holds only the normalized configuration; every `build` call
/// creates its buckets from scratch and shares no mutable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkloadEngine {
    config: WorkloadConfig,
    window: ChartWindow,
    zoom: ZoomLevel,
    reference_date: NaiveDate,
    projector: TimelineProjector,
}

impl WorkloadEngine {
    pub fn new(config: WorkloadConfig) -> WorkloadResult<Self> {
        let config = config.normalized();
        let window = config.window();
        let zoom = config.zoom_level();
        let reference_date = config.resolved_reference_date();
        let projector =
            TimelineProjector::new(window.start, window.end, zoom.pixels_per_day(), reference_date)?;

        Ok(Self {
            config,
            window,
            zoom,
            reference_date,
            projector,
        })
    }

    #[must_use]
    pub fn config(&self) -> WorkloadConfig {
        self.config
    }

    #[must_use]
    pub fn window(&self) -> ChartWindow {
        self.window
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    #[must_use]
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    #[must_use]
    pub fn projector(&self) -> TimelineProjector {
        self.projector
    }

    /// Allocates one resource's batch into display buckets.
    #[must_use]
    pub fn allocate_resource(
        &self,
        resource: &Resource,
        items: &[WorkItem],
        schedule: &CapacitySchedule,
    ) -> AllocationModel {
        let days = EffortAllocator::new(schedule).allocate(
            resource.id,
            items,
            self.window.start,
            self.window.end,
            self.reference_date,
        );
        let measure = self.config.measure;

        let buckets = match self.zoom.bucket_mode() {
            BucketMode::Day => days
                .into_iter()
                .map(|day| {
                    AllocationBucket::from_day(day, self.reference_date, measure, self.projector)
                })
                .collect(),
            BucketMode::Week => aggregate_weeks(&days)
                .into_iter()
                .map(|week| {
                    AllocationBucket::from_week(week, self.reference_date, measure, self.projector)
                })
                .collect(),
        };

        AllocationModel {
            resource: resource.clone(),
            buckets,
            truncated: false,
        }
    }

    /// Builds the chart from a single source implementing all providers.
    pub fn build<P>(&self, source: &P) -> WorkloadResult<WorkloadChart>
    where
        P: ResourceProvider + WorkItemProvider + CapacityScheduleProvider,
    {
        self.build_with(source, source, source)
    }

    /// Builds the chart, stopping at the configured row limit.
    pub fn build_with(
        &self,
        resources: &dyn ResourceProvider,
        work_items: &dyn WorkItemProvider,
        schedules: &dyn CapacityScheduleProvider,
    ) -> WorkloadResult<WorkloadChart> {
        let mut budget = RowBudget::new(self.config.row_limit);
        let mut batches = Vec::new();

        for resource in resources.active_resources(self.window)? {
            if !budget.admit() {
                break;
            }
            let items = work_items.fetch_assigned(resource.id, self.window)?;
            let schedule = match schedules.schedule_for(resource.id)? {
                Some(schedule) => schedule,
                None => {
                    debug!(resource = %resource.id, "no capacity schedule; using default pattern");
                    CapacitySchedule::default()
                }
            };
            batches.push((resource, items, schedule));
            if budget.record() {
                break;
            }
        }

        let mut rows = self.allocate_batches(&batches);
        if budget.truncated() {
            if let Some(last) = rows.last_mut() {
                last.truncated = true;
            }
        }

        debug!(
            rows = rows.len(),
            truncated = budget.truncated(),
            window_start = %self.window.start,
            window_end = %self.window.end,
            zoom = self.zoom.level(),
            "built workload chart"
        );

        Ok(WorkloadChart {
            window: self.window,
            zoom: self.zoom,
            measure: self.config.measure,
            reference_date: self.reference_date,
            pixels_per_day: self.projector.pixels_per_day(),
            width_px: self.projector.width_px(),
            header: TimelineHeader::build(self.projector, self.zoom),
            today_marker_px: self.projector.today_marker(),
            rows,
            truncated: budget.truncated(),
        })
    }

    fn allocate_batches(
        &self,
        batches: &[(Resource, Vec<WorkItem>, CapacitySchedule)],
    ) -> Vec<AllocationModel> {
        #[cfg(feature = "parallel-allocation")]
        {
            batches
                .par_iter()
                .map(|(resource, items, schedule)| self.allocate_resource(resource, items, schedule))
                .collect()
        }

        #[cfg(not(feature = "parallel-allocation"))]
        {
            batches
                .iter()
                .map(|(resource, items, schedule)| self.allocate_resource(resource, items, schedule))
                .collect()
        }
    }
}
