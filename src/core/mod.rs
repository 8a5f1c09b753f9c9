pub mod allocation;
pub mod capacity;
pub mod descendants;
pub mod measures;
pub mod primitives;
pub mod projection;
pub mod types;
pub mod weekly;

pub use allocation::{DayBucket, EffortAllocator, ItemIds};
pub use capacity::{Absence, CapacityEntry, CapacitySchedule, DEFAULT_WEEKDAY_HOURS};
pub use descendants::{DescendantEffortResolver, ResolvedEffort};
pub use measures::{Measure, Measures};
pub use projection::{SpanCoordinates, TimelineProjector};
pub use types::{Resource, ResourceId, WorkItem, WorkItemId};
pub use weekly::{WeekBucket, aggregate_weeks};
