use quiz_core::model::{CategoryKey, Difficulty, OPTION_COUNT, Phase, QuestionId, SelfLevel, SessionState};
use quiz_core::{AssessmentEngine, AssessmentReport, CategorySummary, Progress};

use quiz_core::model::SubmissionStatus;

/// Question as shown on screen, without the answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub id: QuestionId,
    pub category: CategoryKey,
    pub difficulty: Difficulty,
    pub text: &'static str,
    pub options: [&'static str; OPTION_COUNT],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub is_correct: bool,
    pub chosen_index: usize,
    pub correct_index: usize,
    pub explanation_short: &'static str,
    pub explanation_more: Option<&'static str>,
}

/// Presentation-agnostic snapshot of everything a UI driver renders.
///
/// Only the parts relevant to `phase` are populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentView {
    pub phase: Phase,
    pub self_level: Option<SelfLevel>,
    pub category_title: Option<&'static str>,
    /// `None` in the question phase means no question was available.
    pub question: Option<QuestionView>,
    pub last_chosen_index: Option<usize>,
    pub feedback: Option<FeedbackView>,
    pub progress: Progress,
    pub category_summary: Option<CategorySummary>,
    pub report: Option<AssessmentReport>,
    pub submission: Option<SubmissionStatus>,
}

impl AssessmentView {
    #[must_use]
    pub fn build(
        engine: &AssessmentEngine,
        state: &SessionState,
        submission: Option<SubmissionStatus>,
    ) -> Self {
        let question = engine.current_question(state).map(|q| QuestionView {
            id: q.id,
            category: q.category,
            difficulty: q.difficulty,
            text: q.text,
            options: q.options,
        });
        let feedback = engine.feedback(state).map(|f| FeedbackView {
            is_correct: f.is_correct,
            chosen_index: f.chosen_index,
            correct_index: f.correct_index,
            explanation_short: f.question.explanation_short,
            explanation_more: f.question.explanation_more,
        });

        Self {
            phase: state.phase(),
            self_level: state.self_level(),
            category_title: engine.current_category(state).map(|c| c.title),
            question,
            last_chosen_index: state.last_chosen_index(),
            feedback,
            progress: engine.progress(state),
            category_summary: engine.category_summary(state),
            report: engine.results(state),
            submission: if state.phase() == Phase::Results {
                submission
            } else {
                None
            },
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.phase == Phase::Question && self.question.is_none()
    }
}
