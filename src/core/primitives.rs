use chrono::{Datelike, Days, NaiveDate, Weekday};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{WorkloadError, WorkloadResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> WorkloadResult<f64> {
    value.to_f64().ok_or_else(|| {
        WorkloadError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Validates an hour quantity: finite and `>= 0`.
pub fn validate_hours(value: f64, field_name: &str) -> WorkloadResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(WorkloadError::InvalidData(format!(
            "{field_name} must be finite and >= 0"
        )));
    }
    Ok(value)
}

/// Signed day distance `to - from`.
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Next calendar day, saturating at the end of chrono's supported range.
#[must_use]
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// Monday of the ISO week containing `date`.
#[must_use]
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Inclusive iterator over `[from, to]`; empty when `from > to`.
pub fn date_range(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let mut cursor = Some(from);
    std::iter::from_fn(move || {
        let current = cursor?;
        if current > to {
            cursor = None;
            return None;
        }
        cursor = current.succ_opt();
        Some(current)
    })
}

#[must_use]
pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}
