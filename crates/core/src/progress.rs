use crate::model::CategoryKey;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub answered: usize,
    pub expected_total: usize,
    pub category_index: usize,
    pub category_count: usize,
    pub answered_in_category: usize,
    pub questions_in_category: usize,
}

impl Progress {
    /// Overall completion as a whole percentage.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.expected_total == 0 {
            return 0;
        }
        let pct = (self.answered.min(self.expected_total) * 100) / self.expected_total;
        u8::try_from(pct).unwrap_or(100)
    }
}

/// Outcome of a finished category, shown between categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: CategoryKey,
    pub title: &'static str,
    pub score: u8,
    pub answered: usize,
    pub correct: usize,
    pub is_last: bool,
}
