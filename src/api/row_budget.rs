use serde::{Deserialize, Serialize};

/// Returns `true` once `rendered_count` has reached `limit`.
///
/// `None` means unbounded.
#[must_use]
pub fn should_stop(rendered_count: usize, limit: Option<usize>) -> bool {
    limit.is_some_and(|limit| rendered_count >= limit)
}

/// Tracks how many resource rows were emitted against an optional cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowBudget {
    limit: Option<usize>,
    rendered: usize,
    truncated: bool,
}

impl RowBudget {
    #[must_use]
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            rendered: 0,
            truncated: false,
        }
    }

    #[must_use]
    pub fn limit(self) -> Option<usize> {
        self.limit
    }

    #[must_use]
    pub fn rendered(self) -> usize {
        self.rendered
    }

    #[must_use]
    pub fn truncated(self) -> bool {
        self.truncated
    }

    /// `false` when no further row may be emitted; marks the budget truncated.
    pub fn admit(&mut self) -> bool {
        if should_stop(self.rendered, self.limit) {
            self.truncated = true;
            return false;
        }
        true
    }

    /// Records an emitted row and returns `true` when iteration must stop now.
    pub fn record(&mut self) -> bool {
        self.rendered += 1;
        if should_stop(self.rendered, self.limit) {
            self.truncated = true;
        }
        self.truncated
    }
}
