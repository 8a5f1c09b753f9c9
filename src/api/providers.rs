use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::{CapacitySchedule, Resource, ResourceId, WorkItem};
use crate::error::WorkloadResult;

use super::ChartWindow;

/// Active resources to chart, in display order.
pub trait ResourceProvider {
    fn active_resources(&self, window: ChartWindow) -> WorkloadResult<Vec<Resource>>;
}

/// Work items assigned to one resource.
///
/// Implementations return only items with a due date, ordered by start date
/// ascending, and include descendants whose effort should be subtracted from
/// their ancestors.
pub trait WorkItemProvider {
    fn fetch_assigned(
        &self,
        resource: ResourceId,
        window: ChartWindow,
    ) -> WorkloadResult<Vec<WorkItem>>;
}

/// Per-resource capacity schedules; `None` selects the default weekday pattern.
pub trait CapacityScheduleProvider {
    fn schedule_for(&self, resource: ResourceId) -> WorkloadResult<Option<CapacitySchedule>>;
}

/// Owned, in-process implementation of all three providers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryDirectory {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub schedules: HashMap<ResourceId, CapacitySchedule>,
    #[serde(default)]
    pub work_items: Vec<WorkItem>,
}

impl InMemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    #[must_use]
    pub fn with_schedule(mut self, resource: ResourceId, schedule: CapacitySchedule) -> Self {
        self.schedules.insert(resource, schedule);
        self
    }

    #[must_use]
    pub fn with_work_item(mut self, item: WorkItem) -> Self {
        self.work_items.push(item);
        self
    }

    #[must_use]
    pub fn with_work_items(mut self, items: impl IntoIterator<Item = WorkItem>) -> Self {
        self.work_items.extend(items);
        self
    }

    /// Re-checks hour invariants of deserialized content.
    pub fn validate(&self) -> WorkloadResult<()> {
        for schedule in self.schedules.values() {
            schedule.validate()?;
        }
        for item in &self.work_items {
            item.validate()?;
        }
        Ok(())
    }
}

impl ResourceProvider for InMemoryDirectory {
    fn active_resources(&self, _window: ChartWindow) -> WorkloadResult<Vec<Resource>> {
        let mut resources: Vec<Resource> = self
            .resources
            .iter()
            .filter(|resource| resource.active)
            .cloned()
            .collect();
        resources.sort_by(|a, b| a.display_key.cmp(&b.display_key).then(a.id.cmp(&b.id)));
        Ok(resources)
    }
}

impl WorkItemProvider for InMemoryDirectory {
    fn fetch_assigned(
        &self,
        resource: ResourceId,
        _window: ChartWindow,
    ) -> WorkloadResult<Vec<WorkItem>> {
        let mut items: Vec<WorkItem> = self
            .work_items
            .iter()
            .filter(|item| item.assignee == resource && item.due_date.is_some())
            .cloned()
            .collect();
        // Missing start dates sort last; ties keep insertion order.
        items.sort_by_key(|item| (item.start_date.is_none(), item.start_date));
        Ok(items)
    }
}

impl CapacityScheduleProvider for InMemoryDirectory {
    fn schedule_for(&self, resource: ResourceId) -> WorkloadResult<Option<CapacitySchedule>> {
        Ok(self.schedules.get(&resource).cloned())
    }
}
