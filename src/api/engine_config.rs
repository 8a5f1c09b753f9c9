use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::Measure;

pub const MIN_WINDOW_MONTHS: u32 = 1;
pub const MAX_WINDOW_MONTHS: u32 = 24;
pub const DEFAULT_WINDOW_MONTHS: u32 = 6;

/// Display granularity, `1` (coarsest) to `4` (finest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct ZoomLevel(u8);

impl From<u8> for ZoomLevel {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

impl From<ZoomLevel> for u8 {
    fn from(zoom: ZoomLevel) -> Self {
        zoom.0
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(2)
    }
}

/// Bucket granularity produced for one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BucketMode {
    Day,
    Week,
}

impl ZoomLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Clamps out-of-range levels to the nearest valid one.
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::MIN, Self::MAX))
    }

    #[must_use]
    pub fn level(self) -> u8 {
        self.0
    }

    /// Pixel width of one day: 1, 2, 4 or 8.
    #[must_use]
    pub fn pixels_per_day(self) -> f64 {
        f64::from(1_u32 << (self.0 - 1))
    }

    #[must_use]
    pub fn bucket_mode(self) -> BucketMode {
        if self.0 <= 2 {
            BucketMode::Week
        } else {
            BucketMode::Day
        }
    }

    #[must_use]
    pub fn shows_weeks(self) -> bool {
        self.0 > 1
    }

    #[must_use]
    pub fn shows_days(self) -> bool {
        self.0 > 2
    }

    /// Whether buckets are wide enough to carry per-bucket detail (tooltips).
    #[must_use]
    pub fn shows_bucket_details(self) -> bool {
        self.0 >= 4
    }

    #[must_use]
    pub fn zoom_in(self) -> Option<Self> {
        (self.0 < Self::MAX).then(|| Self(self.0 + 1))
    }

    #[must_use]
    pub fn zoom_out(self) -> Option<Self> {
        (self.0 > Self::MIN).then(|| Self(self.0 - 1))
    }
}

/// Inclusive date window covered by one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub months: u32,
}

impl ChartWindow {
    /// Window of `months` months starting at `start`; `end` is the day before
    /// `start + months`.
    #[must_use]
    pub fn new(start: NaiveDate, months: u32) -> Self {
        let months = months.clamp(MIN_WINDOW_MONTHS, MAX_WINDOW_MONTHS);
        let end = start
            .checked_add_months(Months::new(months))
            .and_then(|next| next.checked_sub_days(Days::new(1)))
            .unwrap_or(start);
        Self { start, end, months }
    }

    #[must_use]
    pub fn day_count(self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Same-length window immediately before this one.
    #[must_use]
    pub fn previous(self) -> Self {
        let start = self
            .start
            .checked_sub_months(Months::new(self.months))
            .unwrap_or(self.start);
        Self::new(start, self.months)
    }

    /// Same-length window immediately after this one.
    #[must_use]
    pub fn next(self) -> Self {
        let start = self
            .start
            .checked_add_months(Months::new(self.months))
            .unwrap_or(self.start);
        Self::new(start, self.months)
    }
}

/// Entry-point configuration.
///
/// Serializable so hosts can persist a user's chart setup. Out-of-range
/// months/zoom are clamped by `normalized`, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    pub window_start: NaiveDate,
    #[serde(default = "default_window_months")]
    pub window_months: u32,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default)]
    pub row_limit: Option<usize>,
    #[serde(default)]
    pub measure: Measure,
    /// Defaults to the local "today" when absent.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

fn default_window_months() -> u32 {
    DEFAULT_WINDOW_MONTHS
}

fn default_zoom() -> u8 {
    ZoomLevel::default().level()
}

impl WorkloadConfig {
    #[must_use]
    pub fn new(window_start: NaiveDate) -> Self {
        Self {
            window_start,
            window_months: default_window_months(),
            zoom: default_zoom(),
            row_limit: None,
            measure: Measure::default(),
            reference_date: None,
        }
    }

    /// Window starting on the first day of `year`-`month`; invalid months fall
    /// back to January.
    #[must_use]
    pub fn for_month(year: i32, month: u32) -> Self {
        let month = if (1..=12).contains(&month) { month } else { 1 };
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .unwrap_or_else(|| first_of_month(Local::now().date_naive()));
        Self::new(start)
    }

    /// Window starting on the first day of the current month.
    #[must_use]
    pub fn current_month() -> Self {
        Self::new(first_of_month(Local::now().date_naive()))
    }

    #[must_use]
    pub fn with_window_months(mut self, months: u32) -> Self {
        self.window_months = months;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_row_limit(mut self, row_limit: Option<usize>) -> Self {
        self.row_limit = row_limit;
        self
    }

    #[must_use]
    pub fn with_measure(mut self, measure: Measure) -> Self {
        self.measure = measure;
        self
    }

    #[must_use]
    pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
        self.reference_date = Some(reference_date);
        self
    }

    /// Copy with months and zoom clamped into their valid ranges.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            window_months: self
                .window_months
                .clamp(MIN_WINDOW_MONTHS, MAX_WINDOW_MONTHS),
            zoom: ZoomLevel::new(self.zoom).level(),
            ..self
        }
    }

    #[must_use]
    pub fn window(self) -> ChartWindow {
        ChartWindow::new(self.window_start, self.window_months)
    }

    #[must_use]
    pub fn zoom_level(self) -> ZoomLevel {
        ZoomLevel::new(self.zoom)
    }

    #[must_use]
    pub fn resolved_reference_date(self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Config for the window before this one, keeping zoom, measure and limits.
    #[must_use]
    pub fn previous_window(self) -> Self {
        let window = self.window().previous();
        Self {
            window_start: window.start,
            ..self
        }
    }

    /// Config for the window after this one, keeping zoom, measure and limits.
    #[must_use]
    pub fn next_window(self) -> Self {
        let window = self.window().next();
        Self {
            window_start: window.start,
            ..self
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
