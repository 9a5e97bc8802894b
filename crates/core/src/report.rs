use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bank::QuestionBank;
use crate::insights::{self, ActionStep};
use crate::model::{AnsweredRecord, CategoryKey, LevelTier, SelfLevel};
use crate::scoring::{self, CategoryScore};

/// Full score and report bundle shown on the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentReport {
    /// One entry per configured category, in configuration order.
    pub category_scores: Vec<CategoryScore>,
    pub final_score: u8,
    pub confidence: u8,
    pub tier: LevelTier,
    pub strengths: Vec<CategoryScore>,
    pub growth_areas: Vec<CategoryScore>,
    pub insights: Vec<&'static str>,
    pub action_plan: [ActionStep; 3],
    pub answered_count: usize,
    pub expected_total: usize,
}

impl AssessmentReport {
    /// Derive the report from the answer log alone.
    #[must_use]
    pub fn build(bank: &QuestionBank, answered: &[AnsweredRecord]) -> Self {
        let categories = bank.categories();
        let category_scores = scoring::score_categories(answered, categories);
        let final_score = scoring::final_score(&category_scores, categories);
        let expected_total = bank.expected_total();
        let confidence = scoring::confidence(
            answered.len(),
            expected_total,
            scoring::distinct_difficulties(answered),
        );

        Self {
            strengths: insights::strengths(&category_scores),
            growth_areas: insights::growth_areas(&category_scores),
            insights: insights::cross_category_insights(&category_scores),
            action_plan: insights::action_plan(final_score),
            tier: scoring::level_label(final_score),
            category_scores,
            final_score,
            confidence,
            answered_count: answered.len(),
            expected_total,
        }
    }

    #[must_use]
    pub fn score_of(&self, category: CategoryKey) -> Option<u8> {
        self.category_scores
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.score)
    }

    /// One-line summary stored alongside submitted results.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "Financial literacy {}/100 ({}), confidence {}%, {} of {} answered",
            self.final_score,
            self.tier.label(),
            self.confidence,
            self.answered_count,
            self.expected_total
        )
    }

    #[must_use]
    pub fn raw_data(
        &self,
        started_at: DateTime<Utc>,
        self_level: Option<SelfLevel>,
    ) -> RawResultData {
        RawResultData {
            final_score: self.final_score,
            category_scores: self
                .category_scores
                .iter()
                .map(|s| (s.category, s.score))
                .collect(),
            confidence: self.confidence,
            answered_count: self.answered_count,
            expected_total: self.expected_total,
            tier: self.tier,
            self_level,
            started_at,
        }
    }
}

/// Snapshot of a completed session handed to the result store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResultData {
    pub final_score: u8,
    pub category_scores: BTreeMap<CategoryKey, u8>,
    pub confidence: u8,
    pub answered_count: usize,
    pub expected_total: usize,
    pub tier: LevelTier,
    pub self_level: Option<SelfLevel>,
    pub started_at: DateTime<Utc>,
}
