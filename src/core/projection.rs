use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::WorkItem;
use crate::core::primitives::days_between;
use crate::error::{WorkloadError, WorkloadResult};

/// Pixel offsets of a date span relative to the left edge of the visible window.
///
/// Every field is absent when the span lies entirely outside the window.
/// `start`/`end` are marker positions and exist only when that edge of the
/// span is strictly inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpanCoordinates {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub bar_start: Option<f64>,
    pub bar_end: Option<f64>,
    pub bar_progress_end: Option<f64>,
    pub bar_late_end: Option<f64>,
}

impl SpanCoordinates {
    #[must_use]
    pub fn is_visible(self) -> bool {
        self.bar_start.is_some() && self.bar_end.is_some()
    }

    #[must_use]
    pub fn bar_width(self) -> Option<f64> {
        Some(self.bar_end? - self.bar_start?)
    }

    /// Copy with every present field floored, for integral-pixel backends.
    #[must_use]
    pub fn floored(self) -> Self {
        Self {
            start: self.start.map(f64::floor),
            end: self.end.map(f64::floor),
            bar_start: self.bar_start.map(f64::floor),
            bar_end: self.bar_end.map(f64::floor),
            bar_progress_end: self.bar_progress_end.map(f64::floor),
            bar_late_end: self.bar_late_end.map(f64::floor),
        }
    }

    fn fields(self) -> [Option<f64>; 6] {
        [
            self.start,
            self.end,
            self.bar_start,
            self.bar_end,
            self.bar_progress_end,
            self.bar_late_end,
        ]
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.fields().into_iter().flatten().all(f64::is_finite)
    }

    fn scaled(self, pixels_per_day: f64) -> Self {
        let scale = |value: Option<f64>| value.map(|days| days * pixels_per_day);
        Self {
            start: scale(self.start),
            end: scale(self.end),
            bar_start: scale(self.bar_start),
            bar_end: scale(self.bar_end),
            bar_progress_end: scale(self.bar_progress_end),
            bar_late_end: scale(self.bar_late_end),
        }
    }
}

/// Maps dates onto the pixel space of a visible `[visible_from, visible_to]` window.
///
/// Day `d` occupies `[(d - visible_from) * ppd, (d - visible_from + 1) * ppd)`,
/// so bar ends are exclusive pixel edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineProjector {
    visible_from: NaiveDate,
    visible_to: NaiveDate,
    pixels_per_day: f64,
    today: NaiveDate,
}

impl TimelineProjector {
    pub fn new(
        visible_from: NaiveDate,
        visible_to: NaiveDate,
        pixels_per_day: f64,
        today: NaiveDate,
    ) -> WorkloadResult<Self> {
        if visible_to < visible_from {
            return Err(WorkloadError::InvalidWindow {
                start: visible_from,
                end: visible_to,
            });
        }
        if !pixels_per_day.is_finite() || pixels_per_day <= 0.0 {
            return Err(WorkloadError::InvalidScale(pixels_per_day));
        }

        Ok(Self {
            visible_from,
            visible_to,
            pixels_per_day,
            today,
        })
    }

    #[must_use]
    pub fn visible_range(self) -> (NaiveDate, NaiveDate) {
        (self.visible_from, self.visible_to)
    }

    #[must_use]
    pub fn pixels_per_day(self) -> f64 {
        self.pixels_per_day
    }

    /// Total pixel width of the visible window.
    #[must_use]
    pub fn width_px(self) -> f64 {
        (self.offset(self.visible_to) + 1.0) * self.pixels_per_day
    }

    /// Left edge of `date`'s day column; may lie outside the window.
    #[must_use]
    pub fn date_to_pixel(self, date: NaiveDate) -> f64 {
        self.offset(date) * self.pixels_per_day
    }

    /// Position of the "today" line (right edge of today's column) when today is visible.
    #[must_use]
    pub fn today_marker(self) -> Option<f64> {
        if self.today < self.visible_from || self.today > self.visible_to {
            return None;
        }
        Some((self.offset(self.today) + 1.0) * self.pixels_per_day)
    }

    /// Projects `[start, end]` with an optional completion percentage.
    ///
    /// Reversed spans project to nothing.
    #[must_use]
    pub fn project(
        self,
        start: NaiveDate,
        end: NaiveDate,
        completion_pct: Option<f64>,
    ) -> SpanCoordinates {
        if start > end || start > self.visible_to || end < self.visible_from {
            return SpanCoordinates::default();
        }

        let start_offset = self.offset(start);
        let end_offset = self.offset(end);
        let last_offset = self.offset(self.visible_to);
        let mut coords = SpanCoordinates::default();

        if start > self.visible_from {
            coords.bar_start = Some(start_offset);
            if start < self.visible_to {
                coords.start = Some(start_offset);
            }
        } else {
            coords.bar_start = Some(0.0);
        }

        if end < self.visible_to {
            coords.bar_end = Some(end_offset + 1.0);
            if end > self.visible_from {
                coords.end = Some(end_offset);
            }
        } else {
            coords.bar_end = Some(last_offset + 1.0);
        }

        if let Some(pct) = completion_pct.filter(|pct| pct.is_finite()) {
            let pct = pct.clamp(0.0, 100.0);
            let progress_offset = start_offset + (end_offset - start_offset + 1.0) * pct / 100.0;
            if progress_offset > 0.0 && progress_offset > start_offset {
                coords.bar_progress_end = Some(if progress_offset < last_offset {
                    progress_offset
                } else {
                    last_offset + 1.0
                });
            }

            let today_offset = self.offset(self.today);
            if progress_offset < today_offset {
                let late_offset = today_offset.min(end_offset);
                if late_offset > 0.0 && late_offset > start_offset {
                    coords.bar_late_end = Some(if late_offset < last_offset {
                        late_offset + 1.0
                    } else {
                        last_offset + 1.0
                    });
                }
            }
        }

        coords.scaled(self.pixels_per_day)
    }

    /// Projects a work item's `[start, due]` span using its done ratio as completion.
    #[must_use]
    pub fn project_work_item(self, item: &WorkItem) -> SpanCoordinates {
        match (item.start_date, item.due_date) {
            (Some(start), Some(due)) => self.project(start, due, item.done_ratio),
            _ => SpanCoordinates::default(),
        }
    }

    fn offset(self, date: NaiveDate) -> f64 {
        days_between(self.visible_from, date) as f64
    }
}
