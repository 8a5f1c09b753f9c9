use workload_rs::core::{Measure, Measures};

#[test]
fn measures_follow_capacity_and_effort() {
    let measures = Measures::from_load(8.0, 2.0);

    assert_eq!(measures.planned_capacity, 2.0);
    assert_eq!(measures.free_capacity, 6.0);
    assert!((measures.workload_pct - 25.0).abs() <= 1e-9);
    assert!((measures.availability_pct - 75.0).abs() <= 1e-9);
}

#[test]
fn zero_capacity_yields_zero_percentages() {
    let measures = Measures::from_load(0.0, 3.0);

    assert_eq!(measures.workload_pct, 0.0);
    assert_eq!(measures.availability_pct, 0.0);
    assert_eq!(measures.free_capacity, -3.0);
}

#[test]
fn overbooked_day_has_negative_availability() {
    let measures = Measures::from_load(4.0, 6.0);

    assert!((measures.workload_pct - 150.0).abs() <= 1e-9);
    assert!((measures.availability_pct + 50.0).abs() <= 1e-9);
}

#[test]
fn each_measure_selects_its_own_value() {
    let measures = Measures::from_load(8.0, 2.0);

    assert_eq!(measures.value(Measure::PlannedCapacity), 2.0);
    assert_eq!(measures.value(Measure::FreeCapacity), 6.0);
    assert!((measures.value(Measure::Workload) - 25.0).abs() <= 1e-9);
    assert!((measures.value(Measure::Availability) - 75.0).abs() <= 1e-9);
}

#[test]
fn measure_keys_are_kebab_case() {
    let json = serde_json::to_string(&Measure::ALL).expect("serialize");
    assert_eq!(
        json,
        r#"["planned-capacity","free-capacity","workload","availability"]"#
    );
    assert!(Measure::Workload.is_percentage());
    assert!(!Measure::FreeCapacity.is_percentage());
    assert_eq!(Measure::default(), Measure::Availability);
}
