use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::answer::AnsweredRecord;
use crate::model::category::{CategoryConfig, CategoryKey};
use crate::model::ids::QuestionId;
use crate::model::level::SelfLevel;
use crate::model::question::Difficulty;

/// Lifecycle phase of an assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Intro,
    Question,
    Feedback,
    CategorySummary,
    Results,
}

/// Outcome of the one-shot result submission, kept next to its marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Saving,
    Saved,
    Failed,
}

impl SubmissionStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Saving => "Saving your results...",
            Self::Saved => "Results saved.",
            Self::Failed => "Results could not be saved.",
        }
    }
}

/// The only mutable state of the assessment.
///
/// Values are produced by `AssessmentEngine::reduce` and persisted as whole
/// snapshots. `submitted_for` is the idempotency marker for result submission:
/// it holds the `started_at` of the session whose results were handed to the
/// result store, and `submission` is the last known outcome of that hand-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub(crate) phase: Phase,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) current_category_index: usize,
    pub(crate) per_category_difficulty: BTreeMap<CategoryKey, Difficulty>,
    pub(crate) used_question_ids: BTreeSet<QuestionId>,
    pub(crate) answered: Vec<AnsweredRecord>,
    pub(crate) current_question_id: Option<QuestionId>,
    pub(crate) last_chosen_index: Option<usize>,
    pub(crate) self_level: Option<SelfLevel>,
    #[serde(default)]
    pub(crate) submitted_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) submission: Option<SubmissionStatus>,
}

impl SessionState {
    /// A session in `Intro` with every category at its configured target difficulty.
    #[must_use]
    pub fn fresh(started_at: DateTime<Utc>, categories: &[CategoryConfig]) -> Self {
        Self {
            phase: Phase::Intro,
            started_at,
            current_category_index: 0,
            per_category_difficulty: categories
                .iter()
                .map(|c| (c.key, c.target_difficulty))
                .collect(),
            used_question_ids: BTreeSet::new(),
            answered: Vec::new(),
            current_question_id: None,
            last_chosen_index: None,
            self_level: None,
            submitted_for: None,
            submission: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn current_category_index(&self) -> usize {
        self.current_category_index
    }

    #[must_use]
    pub fn per_category_difficulty(&self) -> &BTreeMap<CategoryKey, Difficulty> {
        &self.per_category_difficulty
    }

    /// Desired difficulty for `category`; categories without an entry start at medium.
    #[must_use]
    pub fn desired_difficulty(&self, category: CategoryKey) -> Difficulty {
        self.per_category_difficulty
            .get(&category)
            .copied()
            .unwrap_or(Difficulty::MEDIUM)
    }

    #[must_use]
    pub fn used_question_ids(&self) -> &BTreeSet<QuestionId> {
        &self.used_question_ids
    }

    #[must_use]
    pub fn answered(&self) -> &[AnsweredRecord] {
        &self.answered
    }

    #[must_use]
    pub fn answered_in(&self, category: CategoryKey) -> usize {
        self.answered
            .iter()
            .filter(|record| record.category == category)
            .count()
    }

    /// Most recent answer, used to render feedback.
    #[must_use]
    pub fn last_answer(&self) -> Option<&AnsweredRecord> {
        self.answered.last()
    }

    #[must_use]
    pub fn current_question_id(&self) -> Option<QuestionId> {
        self.current_question_id
    }

    #[must_use]
    pub fn last_chosen_index(&self) -> Option<usize> {
        self.last_chosen_index
    }

    #[must_use]
    pub fn self_level(&self) -> Option<SelfLevel> {
        self.self_level
    }

    /// True when results are showing and have not been handed to the result store yet.
    #[must_use]
    pub fn needs_submission(&self) -> bool {
        self.phase == Phase::Results && self.submitted_for != Some(self.started_at)
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted_for == Some(self.started_at)
    }

    /// Status of this session's submission; `None` until the marker is set.
    #[must_use]
    pub fn submission_status(&self) -> Option<SubmissionStatus> {
        if self.is_submitted() {
            self.submission
        } else {
            None
        }
    }

    /// Record that this session's results are being handed to the result store.
    ///
    /// Sets the status to `Saving`. Returns `false` if the marker was already
    /// set for this session.
    pub fn mark_submitted(&mut self) -> bool {
        if self.is_submitted() {
            return false;
        }
        self.submitted_for = Some(self.started_at);
        self.submission = Some(SubmissionStatus::Saving);
        true
    }

    /// Store the outcome of a submission started with `mark_submitted`.
    ///
    /// Ignored when the marker is not set for this session.
    pub fn record_submission(&mut self, status: SubmissionStatus) {
        if self.is_submitted() {
            self.submission = Some(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::STANDARD_CATEGORIES;
    use crate::time::fixed_now;

    #[test]
    fn fresh_session_starts_at_target_difficulty() {
        let state = SessionState::fresh(fixed_now(), &STANDARD_CATEGORIES);
        assert_eq!(state.phase(), Phase::Intro);
        assert_eq!(state.per_category_difficulty().len(), STANDARD_CATEGORIES.len());
        for config in &STANDARD_CATEGORIES {
            assert_eq!(state.desired_difficulty(config.key), config.target_difficulty);
        }
        assert!(state.answered().is_empty());
        assert!(state.used_question_ids().is_empty());
    }

    #[test]
    fn marker_is_keyed_by_start_time() {
        let mut state = SessionState::fresh(fixed_now(), &STANDARD_CATEGORIES);
        state.phase = Phase::Results;
        assert!(state.needs_submission());
        assert_eq!(state.submission_status(), None);
        assert!(state.mark_submitted());
        assert_eq!(state.submission_status(), Some(SubmissionStatus::Saving));
        assert!(!state.mark_submitted());
        assert!(!state.needs_submission());

        state.record_submission(SubmissionStatus::Saved);
        assert_eq!(state.submission_status(), Some(SubmissionStatus::Saved));

        state.started_at = fixed_now() + chrono::Duration::minutes(5);
        assert!(state.needs_submission());
        assert_eq!(state.submission_status(), None);
        state.record_submission(SubmissionStatus::Failed);
        assert_eq!(state.submission_status(), None);
    }

    #[test]
    fn submission_status_survives_serde() {
        let mut state = SessionState::fresh(fixed_now(), &STANDARD_CATEGORIES);
        state.phase = Phase::Results;
        state.mark_submitted();
        state.record_submission(SubmissionStatus::Failed);

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["submission"], "failed");
        let restored: SessionState = serde_json::from_value(value).unwrap();
        assert_eq!(restored.submission_status(), Some(SubmissionStatus::Failed));
    }

    #[test]
    fn snapshot_without_marker_field_deserializes() {
        let state = SessionState::fresh(fixed_now(), &STANDARD_CATEGORIES);
        let mut value = serde_json::to_value(&state).unwrap();
        let fields = value.as_object_mut().unwrap();
        fields.remove("submitted_for");
        fields.remove("submission");
        let restored: SessionState = serde_json::from_value(value).unwrap();
        assert_eq!(restored, state);
    }
}
