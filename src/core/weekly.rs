use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::allocation::{ItemIds, push_unique};
use crate::core::primitives::week_monday;
use crate::core::DayBucket;

/// Monday-Sunday fold of day buckets.
///
/// `start`/`end` are the nominal Monday and Sunday; `day_count` tells how many
/// in-window days were folded (fewer than 7 for a leading partial week).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekBucket {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub day_count: usize,
    pub capacity: f64,
    pub allocated_effort: f64,
    pub contributing_items: ItemIds,
    pub overdue_items: ItemIds,
}

impl WeekBucket {
    fn opening(date: NaiveDate) -> Self {
        let start = week_monday(date);
        Self {
            start,
            end: start.checked_add_days(Days::new(6)).unwrap_or(start),
            day_count: 0,
            capacity: 0.0,
            allocated_effort: 0.0,
            contributing_items: ItemIds::new(),
            overdue_items: ItemIds::new(),
        }
    }

    fn absorb(&mut self, day: &DayBucket) {
        self.day_count += 1;
        self.capacity += day.capacity;
        self.allocated_effort += day.allocated_effort;
        for id in &day.contributing_items {
            push_unique(&mut self.contributing_items, *id);
        }
        for id in &day.overdue_items {
            push_unique(&mut self.overdue_items, *id);
        }
    }

    /// Same consumption rule as days, applied to the week's last day.
    #[must_use]
    pub fn is_measurable(&self, reference: NaiveDate) -> bool {
        self.capacity > 0.0 && self.end >= reference
    }
}

/// Folds consecutive days into weeks, emitting a week when its Sunday is seen.
///
/// A trailing week that never reaches Sunday is dropped, so the last days of a
/// window may not appear in weekly mode.
#[must_use]
pub fn aggregate_weeks(days: &[DayBucket]) -> Vec<WeekBucket> {
    let mut weeks = Vec::with_capacity(days.len() / 7 + 1);
    let mut current: Option<WeekBucket> = None;

    for day in days {
        let week = current.get_or_insert_with(|| WeekBucket::opening(day.date));
        week.absorb(day);
        if day.date.weekday() == Weekday::Sun {
            if let Some(done) = current.take() {
                weeks.push(done);
            }
        }
    }

    weeks
}
