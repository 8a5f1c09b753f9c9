use workload_rs::core::{DescendantEffortResolver, ResourceId, WorkItem, WorkItemId};

fn item(id: u64, estimated: f64, spent: f64, descendants: &[u64]) -> WorkItem {
    WorkItem::new(WorkItemId(id), ResourceId(1))
        .with_effort(estimated, spent)
        .expect("valid effort")
        .with_descendants(descendants.iter().copied().map(WorkItemId))
}

#[test]
fn child_estimate_is_subtracted_from_parent() {
    let items = vec![item(1, 10.0, 0.0, &[2]), item(2, 4.0, 0.0, &[])];
    let mut resolver = DescendantEffortResolver::new(&items);

    let parent = resolver.remaining(WorkItemId(1)).expect("parent in batch");
    assert!((parent.estimated - 6.0).abs() <= 1e-9);
    assert!((parent.remaining_hours() - 6.0).abs() <= 1e-9);
}

#[test]
fn zeroed_child_restores_parent_estimate() {
    let items = vec![item(1, 10.0, 0.0, &[2]), item(2, 0.0, 0.0, &[])];
    let mut resolver = DescendantEffortResolver::new(&items);

    let parent = resolver.remaining(WorkItemId(1)).expect("parent in batch");
    assert!((parent.estimated - 10.0).abs() <= 1e-9);
}

#[test]
fn descendants_outside_the_batch_are_ignored() {
    let items = vec![item(1, 10.0, 3.0, &[2, 99])];
    let mut resolver = DescendantEffortResolver::new(&items);

    let parent = resolver.remaining(WorkItemId(1)).expect("parent in batch");
    assert!((parent.estimated - 10.0).abs() <= 1e-9);
    assert!((parent.spent - 3.0).abs() <= 1e-9);
    assert!(!resolver.contains(WorkItemId(2)));
}

#[test]
fn subtraction_recurses_through_grandchildren() {
    // Child's own effort is 4 - 1 = 3; the parent lists only its child.
    let items = vec![
        item(1, 10.0, 2.0, &[2]),
        item(2, 4.0, 1.0, &[3]),
        item(3, 1.0, 0.5, &[]),
    ];
    let mut resolver = DescendantEffortResolver::new(&items);

    let child = resolver.remaining(WorkItemId(2)).expect("child in batch");
    assert!((child.estimated - 3.0).abs() <= 1e-9);
    assert!((child.spent - 0.5).abs() <= 1e-9);

    let parent = resolver.remaining(WorkItemId(1)).expect("parent in batch");
    assert!((parent.estimated - 7.0).abs() <= 1e-9);
    assert!((parent.spent - 1.5).abs() <= 1e-9);
}

#[test]
fn negative_intermediate_values_clamp_in_remaining_hours() {
    let items = vec![item(1, 3.0, 0.0, &[2]), item(2, 5.0, 0.0, &[])];
    let mut resolver = DescendantEffortResolver::new(&items);

    let parent = resolver.remaining(WorkItemId(1)).expect("parent in batch");
    assert!((parent.estimated + 2.0).abs() <= 1e-9);
    assert_eq!(parent.remaining_hours(), 0.0);
}

#[test]
fn cyclic_batches_resolve_the_same_in_any_order() {
    let items = vec![
        item(1, 10.0, 0.0, &[2]),
        item(2, 4.0, 0.0, &[1]),
        item(3, 20.0, 2.0, &[1]),
    ];

    let mut forward = DescendantEffortResolver::new(&items);
    let forward: Vec<_> = [1, 2, 3]
        .into_iter()
        .map(|id| forward.remaining(WorkItemId(id)).expect("in batch"))
        .collect();

    let mut backward = DescendantEffortResolver::new(&items);
    let mut backward: Vec<_> = [3, 2, 1]
        .into_iter()
        .map(|id| backward.remaining(WorkItemId(id)).expect("in batch"))
        .collect();
    backward.reverse();

    assert_eq!(forward, backward);
    assert!((forward[0].estimated - 10.0).abs() <= 1e-9);
    assert!((forward[1].estimated - 4.0).abs() <= 1e-9);
    // Item 3 sits outside the loop and subtracts item 1's raw effort.
    assert!((forward[2].estimated - 10.0).abs() <= 1e-9);
    assert!((forward[2].spent - 2.0).abs() <= 1e-9);
}

#[test]
fn self_listed_descendant_counts_as_a_cycle() {
    let items = vec![item(1, 8.0, 1.0, &[1])];
    let mut resolver = DescendantEffortResolver::new(&items);

    assert!(resolver.is_cyclic(WorkItemId(1)));
    let resolved = resolver.remaining(WorkItemId(1)).expect("in batch");
    assert!((resolved.remaining_hours() - 7.0).abs() <= 1e-9);
}
