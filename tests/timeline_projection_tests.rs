use chrono::{Days, NaiveDate};
use workload_rs::WorkloadError;
use workload_rs::core::{ResourceId, SpanCoordinates, TimelineProjector, WorkItem, WorkItemId};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Day `offset` relative to 2024-01-01 (negative offsets go back in time).
fn offset(offset: i64) -> NaiveDate {
    let base = day(2024, 1, 1);
    if offset >= 0 {
        base.checked_add_days(Days::new(offset as u64)).expect("date")
    } else {
        base.checked_sub_days(Days::new(offset.unsigned_abs())).expect("date")
    }
}

fn ten_day_projector(pixels_per_day: f64, today: NaiveDate) -> TimelineProjector {
    TimelineProjector::new(offset(0), offset(9), pixels_per_day, today).expect("projector")
}

#[test]
fn span_covering_the_window_is_clamped_without_markers() {
    let projector = ten_day_projector(2.0, offset(0));
    let coords = projector.project(offset(-5), offset(20), None);

    assert_eq!(coords.bar_start, Some(0.0));
    assert_eq!(coords.bar_end, Some(20.0));
    assert_eq!(coords.start, None);
    assert_eq!(coords.end, None);
    assert_eq!(coords.bar_width(), Some(20.0));
}

#[test]
fn span_inside_the_window_has_both_markers() {
    let projector = ten_day_projector(2.0, offset(0));
    let coords = projector.project(offset(2), offset(4), None);

    assert_eq!(coords.start, Some(4.0));
    assert_eq!(coords.bar_start, Some(4.0));
    assert_eq!(coords.end, Some(8.0));
    assert_eq!(coords.bar_end, Some(10.0));
}

#[test]
fn spans_outside_the_window_project_to_nothing() {
    let projector = ten_day_projector(2.0, offset(0));

    assert_eq!(projector.project(offset(-9), offset(-1), None), SpanCoordinates::default());
    assert_eq!(projector.project(offset(10), offset(12), Some(50.0)), SpanCoordinates::default());
    assert_eq!(projector.project(offset(5), offset(3), None), SpanCoordinates::default());
}

#[test]
fn first_and_last_window_days_are_visible() {
    let projector = ten_day_projector(3.0, offset(0));

    let first = projector.project(offset(0), offset(0), None);
    assert_eq!(first.bar_start, Some(0.0));
    assert_eq!(first.bar_end, Some(3.0));
    assert_eq!(first.start, None);
    assert_eq!(first.end, None);

    let last = projector.project(offset(9), offset(9), None);
    assert_eq!(last.bar_start, Some(27.0));
    assert_eq!(last.bar_end, Some(30.0));
    assert_eq!(last.start, None);
}

#[test]
fn progress_and_lateness_follow_completion_and_today() {
    let projector = ten_day_projector(1.0, offset(7));
    // Four-day span, half done: progress reaches the start of day 4.
    let coords = projector.project(offset(2), offset(5), Some(50.0));

    assert_eq!(coords.bar_progress_end, Some(4.0));
    // Behind schedule: the late bar runs to the end of the span's last day.
    assert_eq!(coords.bar_late_end, Some(6.0));
}

#[test]
fn zero_completion_has_no_progress_but_can_be_late() {
    let projector = ten_day_projector(1.0, offset(3));
    let coords = projector.project(offset(2), offset(5), Some(0.0));

    assert_eq!(coords.bar_progress_end, None);
    assert_eq!(coords.bar_late_end, Some(4.0));
}

#[test]
fn on_schedule_span_is_not_late() {
    let projector = ten_day_projector(1.0, offset(3));
    let coords = projector.project(offset(2), offset(5), Some(75.0));

    assert_eq!(coords.bar_progress_end, Some(5.0));
    assert_eq!(coords.bar_late_end, None);
}

#[test]
fn progress_past_the_window_is_clamped() {
    let projector = ten_day_projector(2.0, offset(0));
    let coords = projector.project(offset(5), offset(30), Some(80.0));

    assert_eq!(coords.bar_progress_end, Some(20.0));
}

#[test]
fn no_completion_means_no_progress_or_lateness() {
    let projector = ten_day_projector(1.0, offset(9));
    let coords = projector.project(offset(1), offset(3), None);

    assert_eq!(coords.bar_progress_end, None);
    assert_eq!(coords.bar_late_end, None);
}

#[test]
fn today_marker_sits_at_the_end_of_today() {
    assert_eq!(ten_day_projector(4.0, offset(2)).today_marker(), Some(12.0));
    assert_eq!(ten_day_projector(4.0, offset(12)).today_marker(), None);
    assert_eq!(ten_day_projector(4.0, offset(0)).width_px(), 40.0);
}

#[test]
fn floored_truncates_fractional_pixels() {
    let projector = ten_day_projector(1.5, offset(0));
    let coords = projector.project(offset(1), offset(2), None).floored();

    assert_eq!(coords.bar_start, Some(1.0));
    assert_eq!(coords.bar_end, Some(4.0));
}

#[test]
fn work_items_project_with_done_ratio() {
    let projector = ten_day_projector(1.0, offset(0));
    let item = WorkItem::new(WorkItemId(1), ResourceId(1))
        .with_dates(Some(offset(2)), Some(offset(5)))
        .with_done_ratio(50.0)
        .expect("valid ratio");
    assert_eq!(projector.project_work_item(&item).bar_progress_end, Some(4.0));

    let undated = WorkItem::new(WorkItemId(2), ResourceId(1)).with_dates(None, Some(offset(5)));
    assert_eq!(projector.project_work_item(&undated), SpanCoordinates::default());
}

#[test]
fn invalid_projectors_are_rejected() {
    let err = TimelineProjector::new(offset(5), offset(1), 1.0, offset(0))
        .expect_err("reversed window must fail");
    assert!(matches!(err, WorkloadError::InvalidWindow { .. }));

    for scale in [0.0, -1.0, f64::INFINITY] {
        let err = TimelineProjector::new(offset(0), offset(1), scale, offset(0))
            .expect_err("invalid scale must fail");
        assert!(matches!(err, WorkloadError::InvalidScale(_)));
    }
}
