use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{WorkItem, WorkItemId};

/// Estimated/spent hours attributed to one item after removing the effort of
/// its descendants present in the same batch.
///
/// Either component may be negative when descendants carry more effort than
/// the parent; `remaining_hours` floors the difference.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResolvedEffort {
    pub estimated: f64,
    pub spent: f64,
}

impl ResolvedEffort {
    #[must_use]
    pub fn remaining_hours(self) -> f64 {
        (self.estimated - self.spent).max(0.0)
    }
}

/// Resolves own effort for items of one allocation batch.
///
/// Results are memoized per item id, so an item reachable from several
/// ancestors is resolved once. Items that are their own descendant (directly
/// or through a loop) resolve to their raw effort, independent of query order.
#[derive(Debug)]
pub struct DescendantEffortResolver<'a> {
    batch: IndexMap<WorkItemId, &'a WorkItem>,
    cyclic: HashSet<WorkItemId>,
    memo: HashMap<WorkItemId, ResolvedEffort>,
}

impl<'a> DescendantEffortResolver<'a> {
    #[must_use]
    pub fn new(items: &'a [WorkItem]) -> Self {
        let batch: IndexMap<WorkItemId, &'a WorkItem> =
            items.iter().map(|item| (item.id, item)).collect();
        let cyclic: HashSet<WorkItemId> = batch
            .keys()
            .copied()
            .filter(|id| reaches_itself(&batch, *id))
            .collect();
        if !cyclic.is_empty() {
            warn!(
                items = cyclic.len(),
                "descendant cycle detected; cycle members keep their raw effort"
            );
        }

        Self {
            batch,
            cyclic,
            memo: HashMap::with_capacity(items.len()),
        }
    }

    #[must_use]
    pub fn contains(&self, id: WorkItemId) -> bool {
        self.batch.contains_key(&id)
    }

    #[must_use]
    pub fn is_cyclic(&self, id: WorkItemId) -> bool {
        self.cyclic.contains(&id)
    }

    /// Returns `None` when `id` is not part of the batch.
    pub fn remaining(&mut self, id: WorkItemId) -> Option<ResolvedEffort> {
        if !self.batch.contains_key(&id) {
            return None;
        }
        Some(self.resolve(id))
    }

    fn resolve(&mut self, id: WorkItemId) -> ResolvedEffort {
        if let Some(resolved) = self.memo.get(&id) {
            return *resolved;
        }
        let Some(item) = self.batch.get(&id).copied() else {
            return ResolvedEffort::default();
        };

        let mut resolved = ResolvedEffort {
            estimated: item.estimated_hours,
            spent: item.spent_hours,
        };
        // Cycle members never recurse.
        if !self.cyclic.contains(&id) {
            for descendant in &item.descendants {
                if !self.batch.contains_key(descendant) {
                    continue;
                }
                let child = self.resolve(*descendant);
                resolved.estimated -= child.estimated;
                resolved.spent -= child.spent;
            }
        }

        self.memo.insert(id, resolved);
        resolved
    }
}

/// Whether `id` is reachable from its own in-batch descendants.
fn reaches_itself(batch: &IndexMap<WorkItemId, &WorkItem>, id: WorkItemId) -> bool {
    let mut seen = HashSet::new();
    let mut stack: Vec<WorkItemId> = batch
        .get(&id)
        .map(|item| item.descendants.clone())
        .unwrap_or_default();

    while let Some(current) = stack.pop() {
        if current == id {
            return true;
        }
        if !seen.insert(current) {
            continue;
        }
        if let Some(item) = batch.get(&current) {
            stack.extend(item.descendants.iter().copied());
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::DescendantEffortResolver;
    use crate::core::{ResourceId, WorkItem, WorkItemId};

    fn item(id: u64, estimated: f64, spent: f64, descendants: &[u64]) -> WorkItem {
        WorkItem::new(WorkItemId(id), ResourceId(1))
            .with_effort(estimated, spent)
            .expect("valid effort")
            .with_descendants(descendants.iter().copied().map(WorkItemId))
    }

    #[test]
    fn shared_descendant_is_memoized() {
        let items = vec![
            item(1, 20.0, 0.0, &[3]),
            item(2, 15.0, 0.0, &[3]),
            item(3, 5.0, 1.0, &[]),
        ];
        let mut resolver = DescendantEffortResolver::new(&items);

        let first = resolver.remaining(WorkItemId(1)).expect("in batch");
        let second = resolver.remaining(WorkItemId(2)).expect("in batch");
        assert!((first.estimated - 15.0).abs() <= 1e-9);
        assert!((second.estimated - 10.0).abs() <= 1e-9);
        assert!((second.spent + 1.0).abs() <= 1e-9);
        assert_eq!(resolver.memo.len(), 3);
    }

    #[test]
    fn cycle_members_keep_raw_effort_in_any_query_order() {
        let items = vec![item(1, 10.0, 0.0, &[2]), item(2, 4.0, 0.0, &[1])];

        let mut forward = DescendantEffortResolver::new(&items);
        let forward = (
            forward.remaining(WorkItemId(1)).expect("in batch"),
            forward.remaining(WorkItemId(2)).expect("in batch"),
        );
        let mut backward = DescendantEffortResolver::new(&items);
        let second = backward.remaining(WorkItemId(2)).expect("in batch");
        let first = backward.remaining(WorkItemId(1)).expect("in batch");

        assert_eq!(forward, (first, second));
        assert!((first.estimated - 10.0).abs() <= 1e-9);
        assert!((second.estimated - 4.0).abs() <= 1e-9);
    }

    #[test]
    fn unknown_id_resolves_to_none() {
        let items = vec![item(1, 10.0, 0.0, &[])];
        let mut resolver = DescendantEffortResolver::new(&items);
        assert!(resolver.remaining(WorkItemId(9)).is_none());
    }
}
