use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::question::Difficulty;

/// Topical buckets the assessment is organized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKey {
    Budgeting,
    Debt,
    Saving,
    Investing,
    CrisisPlanning,
}

impl CategoryKey {
    pub const ALL: [Self; 5] = [
        Self::Budgeting,
        Self::Debt,
        Self::Saving,
        Self::Investing,
        Self::CrisisPlanning,
    ];

    /// Stable machine-readable key, used in persisted result payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budgeting => "budgeting",
            Self::Debt => "debt",
            Self::Saving => "saving",
            Self::Investing => "investing",
            Self::CrisisPlanning => "crisis_planning",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for CategoryKey {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| ParseCategoryError(s.to_owned()))
    }
}

/// Static per-category configuration.
///
/// Drives the scheduler (`target_difficulty`, `questions_to_ask`) and the
/// weighted composite score (`weight`).
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryConfig {
    pub key: CategoryKey,
    pub title: &'static str,
    pub weight: f64,
    pub target_difficulty: Difficulty,
    pub questions_to_ask: usize,
}

impl CategoryConfig {
    #[must_use]
    pub const fn new(
        key: CategoryKey,
        title: &'static str,
        weight: f64,
        target_difficulty: Difficulty,
        questions_to_ask: usize,
    ) -> Self {
        Self {
            key,
            title,
            weight,
            target_difficulty,
            questions_to_ask,
        }
    }
}
