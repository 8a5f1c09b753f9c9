use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::primitives::{date_range, days_between};
use crate::core::{CapacitySchedule, DescendantEffortResolver, ResourceId, WorkItem, WorkItemId};

/// Item id list stored per bucket; most days carry only a handful of items.
pub type ItemIds = SmallVec<[WorkItemId; 4]>;

/// Outstanding effort of one resource on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub capacity: f64,
    pub allocated_effort: f64,
    pub contributing_items: ItemIds,
    pub overdue_items: ItemIds,
}

impl DayBucket {
    #[must_use]
    pub fn empty(date: NaiveDate, capacity: f64) -> Self {
        Self {
            date,
            capacity,
            allocated_effort: 0.0,
            contributing_items: SmallVec::new(),
            overdue_items: SmallVec::new(),
        }
    }

    /// Whether the day takes part in measure calculation and rendering.
    ///
    /// Zero-capacity days and days before `reference` stay in the series so it
    /// remains index-addressable, but consumers skip them.
    #[must_use]
    pub fn is_measurable(&self, reference: NaiveDate) -> bool {
        self.capacity > 0.0 && self.date >= reference
    }
}

/// Spreads the remaining effort of a resource's work items over a day window.
///
/// Each item's remaining effort is split across its remaining days
/// proportionally to the resource's daily capacity, so zero-capacity days never
/// absorb work. Items already overdue on the reference date land entirely on
/// the reference day.
#[derive(Debug, Clone, Copy)]
pub struct EffortAllocator<'s> {
    schedule: &'s CapacitySchedule,
}

impl<'s> EffortAllocator<'s> {
    #[must_use]
    pub fn new(schedule: &'s CapacitySchedule) -> Self {
        Self { schedule }
    }

    /// Produces one bucket per date of `[window_start, window_end]`.
    ///
    /// `items` is the whole batch for `resource`; descendants present in the
    /// batch are subtracted from their ancestors before distribution.
    #[must_use]
    pub fn allocate(
        &self,
        resource: ResourceId,
        items: &[WorkItem],
        window_start: NaiveDate,
        window_end: NaiveDate,
        reference_date: NaiveDate,
    ) -> Vec<DayBucket> {
        if window_start > window_end {
            debug!(%resource, %window_start, %window_end, "empty allocation window");
            return Vec::new();
        }

        let mut buckets: Vec<DayBucket> = date_range(window_start, window_end)
            .map(|date| DayBucket::empty(date, self.schedule.capacity_on(date)))
            .collect();

        let mut resolver = DescendantEffortResolver::new(items);
        let mut overdue_count = 0_usize;

        for item in items {
            let Some(due_date) = item.due_date else {
                trace!(item = %item.id, "skipping item without due date");
                continue;
            };
            let remaining = resolver
                .remaining(item.id)
                .map_or(0.0, |resolved| resolved.remaining_hours());

            let from = item
                .start_date
                .unwrap_or(window_start)
                .max(window_start)
                .max(reference_date);
            let to = due_date.min(window_end);
            if from > window_end {
                trace!(item = %item.id, %from, "item starts after window");
                continue;
            }

            if due_date < reference_date && from == reference_date {
                let bucket = &mut buckets[bucket_index(window_start, from)];
                bucket.allocated_effort += remaining;
                push_unique(&mut bucket.overdue_items, item.id);
                overdue_count += 1;
                trace!(item = %item.id, remaining, "overdue item placed on reference day");
                continue;
            }

            // Capacity is summed up to the due date even when it lies past the
            // window, so only the in-window share is distributed.
            let total_capacity = self.schedule.total_capacity(from, due_date);
            if total_capacity <= 0.0 {
                trace!(item = %item.id, "no capacity in item range; skipping distribution");
                continue;
            }

            for date in date_range(from, to) {
                let bucket = &mut buckets[bucket_index(window_start, date)];
                bucket.allocated_effort += bucket.capacity / total_capacity * remaining;
                push_unique(&mut bucket.contributing_items, item.id);
            }
        }

        debug!(
            %resource,
            items = items.len(),
            days = buckets.len(),
            overdue = overdue_count,
            "allocated resource effort"
        );
        buckets
    }
}

fn bucket_index(window_start: NaiveDate, date: NaiveDate) -> usize {
    days_between(window_start, date) as usize
}

pub(crate) fn push_unique(ids: &mut ItemIds, id: WorkItemId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}
