use chrono::{Days, NaiveDate};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use workload_rs::api::{InMemoryDirectory, WorkloadConfig, WorkloadEngine};
use workload_rs::core::{
    CapacitySchedule, EffortAllocator, Resource, ResourceId, TimelineProjector, WorkItem,
    WorkItemId,
};

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

fn generated_items(resource: ResourceId, count: u64, id_offset: u64) -> Vec<WorkItem> {
    (0..count)
        .map(|i| {
            let start = start_date()
                .checked_add_days(Days::new(i * 3 % 150))
                .expect("start in range");
            let due = start
                .checked_add_days(Days::new(5 + i % 20))
                .expect("due in range");
            let descendants = if i % 10 == 0 && i + 1 < count {
                vec![WorkItemId(id_offset + i + 1)]
            } else {
                Vec::new()
            };
            WorkItem::new(WorkItemId(id_offset + i), resource)
                .with_dates(Some(start), Some(due))
                .with_effort(8.0 + (i % 7) as f64 * 4.0, (i % 3) as f64)
                .expect("valid effort")
                .with_descendants(descendants)
        })
        .collect()
}

fn bench_allocate_single_resource_500_items(c: &mut Criterion) {
    let schedule = CapacitySchedule::default();
    let items = generated_items(ResourceId(1), 500, 0);
    let window_end = NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date");

    c.bench_function("allocate_single_resource_500_items", |b| {
        b.iter(|| {
            let _ = EffortAllocator::new(black_box(&schedule)).allocate(
                ResourceId(1),
                black_box(&items),
                start_date(),
                window_end,
                start_date(),
            );
        })
    });
}

fn bench_engine_build_50_resources(c: &mut Criterion) {
    let mut directory = InMemoryDirectory::new();
    for r in 0..50_u64 {
        let resource = ResourceId(r);
        directory = directory
            .with_resource(Resource::new(resource, format!("resource {r:02}")))
            .with_work_items(generated_items(resource, 40, r * 1_000));
    }
    let config = WorkloadConfig::new(start_date())
        .with_window_months(6)
        .with_zoom(3)
        .with_reference_date(start_date());
    let engine = WorkloadEngine::new(config).expect("engine init");

    c.bench_function("engine_build_50_resources_6_months", |b| {
        b.iter(|| {
            let _ = engine
                .build(black_box(&directory))
                .expect("build should succeed");
        })
    });
}

fn bench_projection_10k(c: &mut Criterion) {
    let projector = TimelineProjector::new(
        start_date(),
        NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"),
        4.0,
        start_date(),
    )
    .expect("projector");

    c.bench_function("project_spans_10k", |b| {
        b.iter(|| {
            for i in 0..10_000_u64 {
                let start = start_date()
                    .checked_add_days(Days::new(i % 400))
                    .expect("start");
                let end = start.checked_add_days(Days::new(i % 30)).expect("end");
                let _ = black_box(projector.project(start, end, Some((i % 101) as f64)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_allocate_single_resource_500_items,
    bench_engine_build_50_resources,
    bench_projection_10k
);
criterion_main!(benches);
