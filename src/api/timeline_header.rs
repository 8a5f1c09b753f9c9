use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::TimelineProjector;
use crate::core::primitives::{date_range, is_weekend, week_monday};

use super::ZoomLevel;

/// One header cell in pixel space relative to the window's left edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderCell {
    pub label: Option<String>,
    pub left_px: f64,
    pub width_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayHeaderCell {
    pub date: NaiveDate,
    pub label: String,
    pub weekend: bool,
    pub left_px: f64,
    pub width_px: f64,
}

/// Month/week/day header rows of the chart.
///
/// Week and day rows are empty at zoom levels too coarse to show them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineHeader {
    pub months: Vec<HeaderCell>,
    pub weeks: Vec<HeaderCell>,
    pub days: Vec<DayHeaderCell>,
}

impl TimelineHeader {
    #[must_use]
    pub fn build(projector: TimelineProjector, zoom: ZoomLevel) -> Self {
        Self {
            months: month_cells(projector),
            weeks: if zoom.shows_weeks() {
                week_cells(projector)
            } else {
                Vec::new()
            },
            days: if zoom.shows_days() {
                day_cells(projector)
            } else {
                Vec::new()
            },
        }
    }
}

fn span_cell(
    projector: TimelineProjector,
    from: NaiveDate,
    to: NaiveDate,
    label: Option<String>,
) -> HeaderCell {
    let left_px = projector.date_to_pixel(from);
    let right_px = projector.date_to_pixel(to) + projector.pixels_per_day();
    HeaderCell {
        label,
        left_px,
        width_px: right_px - left_px,
    }
}

fn month_cells(projector: TimelineProjector) -> Vec<HeaderCell> {
    let (from, to) = projector.visible_range();
    let mut cells = Vec::new();
    let mut cursor = from;
    while cursor <= to {
        let next = cursor
            .with_day(1)
            .and_then(|first| first.checked_add_months(Months::new(1)));
        let month_end = next
            .and_then(|next| next.checked_sub_days(Days::new(1)))
            .map_or(to, |end| end.min(to));
        let label = format!("{}-{}", cursor.year(), cursor.month());
        cells.push(span_cell(projector, cursor, month_end, Some(label)));
        match next {
            Some(next) => cursor = next,
            None => break,
        }
    }
    cells
}

fn week_cells(projector: TimelineProjector) -> Vec<HeaderCell> {
    let (from, to) = projector.visible_range();
    let mut cells = Vec::new();
    let mut cursor = from;

    // Leading days before the first Monday get an unlabelled cell.
    let first_monday = week_monday(from);
    if first_monday != from {
        let Some(next_monday) = first_monday.checked_add_days(Days::new(7)) else {
            return cells;
        };
        let leading_end = next_monday.pred_opt().unwrap_or(from).min(to);
        cells.push(span_cell(projector, from, leading_end, None));
        cursor = next_monday;
    }

    while cursor <= to {
        let week_end = cursor
            .checked_add_days(Days::new(6))
            .map_or(to, |end| end.min(to));
        let label = cursor.iso_week().week().to_string();
        cells.push(span_cell(projector, cursor, week_end, Some(label)));
        match cursor.checked_add_days(Days::new(7)) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    cells
}

fn day_cells(projector: TimelineProjector) -> Vec<DayHeaderCell> {
    let (from, to) = projector.visible_range();
    date_range(from, to)
        .map(|date| {
            let weekday = date.weekday();
            DayHeaderCell {
                date,
                label: weekday.to_string().chars().take(1).collect(),
                weekend: is_weekend(weekday),
                left_px: projector.date_to_pixel(date),
                width_px: projector.pixels_per_day(),
            }
        })
        .collect()
}
