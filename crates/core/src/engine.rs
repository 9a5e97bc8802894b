use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::bank::QuestionBank;
use crate::model::{
    AnsweredRecord, CategoryConfig, CategoryKey, OPTION_COUNT, Phase, Question, QuestionId, SelfLevel,
    SessionState,
};
use crate::progress::{CategorySummary, Progress};
use crate::report::AssessmentReport;
use crate::scheduler::{CategoryScheduler, RandomSource};

//
// ─── EVENTS & ERRORS ───────────────────────────────────────────────────────────
//

/// Discrete user actions the UI driver feeds into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    Answer { choice: usize },
    Advance,
    ChangeSelfLevel(SelfLevel),
    /// Discard the session; `started_at` stamps the fresh one.
    Reset { started_at: DateTime<Utc> },
}

impl SessionEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Answer { .. } => "answer",
            Self::Advance => "advance",
            Self::ChangeSelfLevel(_) => "change_self_level",
            Self::Reset { .. } => "reset",
        }
    }
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Events the current phase does not accept. The state is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("{event} is not accepted in the {phase:?} phase")]
    InvalidTransition { phase: Phase, event: &'static str },

    #[error("no question is on screen to answer")]
    NoCurrentQuestion,

    #[error("choice {0} is out of range")]
    ChoiceOutOfRange(usize),

    #[error("self level can only change before the first answer")]
    SelfLevelLocked,

    #[error("question {0} is not in the bank")]
    UnknownQuestion(QuestionId),
}

/// What the feedback screen needs after an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback<'a> {
    pub question: &'a Question,
    pub chosen_index: usize,
    pub is_correct: bool,
    pub correct_index: usize,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Session state machine over a fixed question bank.
///
/// `reduce` is a pure `(state, event) -> state` step: the input state is never
/// modified, and a rejected event returns an error instead of a new state.
///
/// ```text
/// intro → question → feedback → {question | category_summary} → {question | results}
///   ↑                                                                          │
///   └──────────────────────────────── reset ───────────────────────────────────┘
/// ```
#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    bank: QuestionBank,
}

impl AssessmentEngine {
    #[must_use]
    pub fn new(bank: QuestionBank) -> Self {
        Self { bank }
    }

    /// Engine over the built-in catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(QuestionBank::standard())
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn fresh_session(&self, started_at: DateTime<Utc>) -> SessionState {
        SessionState::fresh(started_at, self.bank.categories())
    }

    /// Apply one event and return the next state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the event is not valid for the current phase
    /// or carries an out-of-range choice.
    pub fn reduce(
        &self,
        state: &SessionState,
        event: SessionEvent,
        rng: &mut dyn RandomSource,
    ) -> Result<SessionState, SessionError> {
        let mut next = state.clone();
        match event {
            SessionEvent::Start => self.start(&mut next, rng),
            SessionEvent::Answer { choice } => self.answer(&mut next, choice)?,
            SessionEvent::Advance => self.advance(&mut next, event, rng)?,
            SessionEvent::ChangeSelfLevel(level) => self.change_self_level(&mut next, level, event)?,
            SessionEvent::Reset { started_at } => next = self.fresh_session(started_at),
        }
        Ok(next)
    }

    fn start(&self, state: &mut SessionState, rng: &mut dyn RandomSource) {
        match state.phase {
            Phase::Intro => {
                state.phase = Phase::Question;
                self.serve_next(state, rng);
            }
            // Placeholder on screen: give the scheduler another try.
            Phase::Question if state.current_question_id.is_none() => self.serve_next(state, rng),
            // Resumed mid-session: keep everything as it was.
            _ => {}
        }
    }

    fn answer(&self, state: &mut SessionState, choice: usize) -> Result<(), SessionError> {
        if state.phase != Phase::Question {
            return Err(SessionError::InvalidTransition {
                phase: state.phase,
                event: "answer",
            });
        }
        let id = state
            .current_question_id
            .ok_or(SessionError::NoCurrentQuestion)?;
        if choice >= OPTION_COUNT {
            return Err(SessionError::ChoiceOutOfRange(choice));
        }
        let question = self
            .bank
            .question(id)
            .ok_or(SessionError::UnknownQuestion(id))?;

        let record = AnsweredRecord::grade(question, choice);
        let adapted = state
            .desired_difficulty(record.category)
            .adapt(record.is_correct);

        state.used_question_ids.insert(id);
        state
            .per_category_difficulty
            .insert(record.category, adapted);
        state.answered.push(record);
        state.last_chosen_index = Some(choice);
        state.phase = Phase::Feedback;
        Ok(())
    }

    fn advance(
        &self,
        state: &mut SessionState,
        event: SessionEvent,
        rng: &mut dyn RandomSource,
    ) -> Result<(), SessionError> {
        match state.phase {
            Phase::Feedback => {
                let complete = self
                    .current_category(state)
                    .is_none_or(|config| self.category_complete(state, config.key));
                if complete {
                    self.finish_category(state);
                } else {
                    state.phase = Phase::Question;
                    self.serve_next(state, rng);
                }
                Ok(())
            }
            // "No question available": the category counts as complete.
            Phase::Question if state.current_question_id.is_none() => {
                self.finish_category(state);
                Ok(())
            }
            Phase::CategorySummary => {
                let last = state.current_category_index + 1 >= self.bank.categories().len();
                if last {
                    state.phase = Phase::Results;
                } else {
                    state.current_category_index += 1;
                    state.phase = Phase::Question;
                    self.serve_next(state, rng);
                }
                Ok(())
            }
            phase => Err(SessionError::InvalidTransition {
                phase,
                event: event.name(),
            }),
        }
    }

    /// Reset every category to the level's starting difficulty.
    ///
    /// Seen-but-unanswered questions stay eligible and the question on screen
    /// is kept: `used_question_ids` only ever tracks answered questions.
    fn change_self_level(
        &self,
        state: &mut SessionState,
        level: SelfLevel,
        event: SessionEvent,
    ) -> Result<(), SessionError> {
        if !matches!(state.phase, Phase::Intro | Phase::Question) {
            return Err(SessionError::InvalidTransition {
                phase: state.phase,
                event: event.name(),
            });
        }
        if !state.answered.is_empty() {
            return Err(SessionError::SelfLevelLocked);
        }

        let starting = level.starting_difficulty();
        state.self_level = Some(level);
        state.per_category_difficulty = self
            .bank
            .categories()
            .iter()
            .map(|config| (config.key, starting))
            .collect();
        Ok(())
    }

    fn finish_category(&self, state: &mut SessionState) {
        state.phase = Phase::CategorySummary;
        state.current_question_id = None;
    }

    fn serve_next(&self, state: &mut SessionState, rng: &mut dyn RandomSource) {
        state.last_chosen_index = None;
        state.current_question_id = self.current_category(state).and_then(|config| {
            CategoryScheduler::new(&self.bank).pick_next(
                config.key,
                state.desired_difficulty(config.key),
                &state.used_question_ids,
                rng,
            )
        });
    }

    //
    // ─── READ SIDE ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn current_category(&self, state: &SessionState) -> Option<&CategoryConfig> {
        self.bank.category_at(state.current_category_index)
    }

    /// True once `questions_to_ask` answers were recorded for `category`.
    #[must_use]
    pub fn category_complete(&self, state: &SessionState, category: CategoryKey) -> bool {
        self.bank
            .category(category)
            .is_some_and(|config| state.answered_in(category) >= config.questions_to_ask)
    }

    /// Question on screen in the question and feedback phases.
    #[must_use]
    pub fn current_question(&self, state: &SessionState) -> Option<&Question> {
        state
            .current_question_id
            .and_then(|id| self.bank.question(id))
    }

    /// True when the question phase has nothing to show and only offers to advance.
    #[must_use]
    pub fn is_placeholder(&self, state: &SessionState) -> bool {
        state.phase == Phase::Question && state.current_question_id.is_none()
    }

    #[must_use]
    pub fn feedback<'a>(&'a self, state: &SessionState) -> Option<Feedback<'a>> {
        if state.phase != Phase::Feedback {
            return None;
        }
        let last = state.last_answer()?;
        let question = self.bank.question(last.question_id)?;
        Some(Feedback {
            question,
            chosen_index: last.chosen_index,
            is_correct: last.is_correct,
            correct_index: last.correct_index,
        })
    }

    #[must_use]
    pub fn progress(&self, state: &SessionState) -> Progress {
        let current = self.current_category(state);
        Progress {
            answered: state.answered.len(),
            expected_total: self.bank.expected_total(),
            category_index: state.current_category_index,
            category_count: self.bank.categories().len(),
            answered_in_category: current.map_or(0, |c| state.answered_in(c.key)),
            questions_in_category: current.map_or(0, |c| c.questions_to_ask),
        }
    }

    /// Summary of the category just finished; only in the category summary phase.
    #[must_use]
    pub fn category_summary(&self, state: &SessionState) -> Option<CategorySummary> {
        if state.phase != Phase::CategorySummary {
            return None;
        }
        let config = self.current_category(state)?;
        let records = state
            .answered
            .iter()
            .filter(|record| record.category == config.key);
        Some(CategorySummary {
            category: config.key,
            title: config.title,
            score: crate::scoring::score_category(&state.answered, config.key),
            answered: records.clone().count(),
            correct: records.filter(|record| record.is_correct).count(),
            is_last: state.current_category_index + 1 >= self.bank.categories().len(),
        })
    }

    /// Report for the current answer log, whatever the phase.
    #[must_use]
    pub fn report(&self, state: &SessionState) -> AssessmentReport {
        AssessmentReport::build(&self.bank, &state.answered)
    }

    /// Report bundle exposed only once the session reached results.
    #[must_use]
    pub fn results(&self, state: &SessionState) -> Option<AssessmentReport> {
        (state.phase == Phase::Results).then(|| self.report(state))
    }
}

impl Default for AssessmentEngine {
    fn default() -> Self {
        Self::standard()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, LevelTier};
    use crate::scheduler::{FixedSequence, RngSource};
    use crate::time::fixed_now;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;
    use std::collections::BTreeSet;

    fn step(
        engine: &AssessmentEngine,
        state: &SessionState,
        event: SessionEvent,
        rng: &mut dyn RandomSource,
    ) -> SessionState {
        engine.reduce(state, event, rng).unwrap()
    }

    fn correct_choice(engine: &AssessmentEngine, state: &SessionState) -> usize {
        engine.current_question(state).unwrap().correct_index
    }

    fn wrong_choice(engine: &AssessmentEngine, state: &SessionState) -> usize {
        (correct_choice(engine, state) + 1) % OPTION_COUNT
    }

    fn assert_invariants(engine: &AssessmentEngine, state: &SessionState) {
        let answered_ids: BTreeSet<_> = state.answered().iter().map(|r| r.question_id).collect();
        assert_eq!(answered_ids.len(), state.answered().len(), "duplicate answers");
        assert_eq!(&answered_ids, state.used_question_ids());
        for config in engine.bank().categories() {
            assert!(state.answered_in(config.key) <= config.questions_to_ask);
            let level = state.desired_difficulty(config.key).value();
            assert!((1..=3).contains(&level));
        }
    }

    /// Drive a session to results, choosing answers with `choose`.
    fn run_to_results(
        engine: &AssessmentEngine,
        mut state: SessionState,
        rng: &mut dyn RandomSource,
        mut choose: impl FnMut(&AssessmentEngine, &SessionState) -> usize,
    ) -> SessionState {
        state = step(engine, &state, SessionEvent::Start, rng);
        while state.phase() != Phase::Results {
            let previous = state.answered().to_vec();
            let event = match state.phase() {
                Phase::Question if engine.is_placeholder(&state) => SessionEvent::Advance,
                Phase::Question => SessionEvent::Answer {
                    choice: choose(engine, &state),
                },
                _ => SessionEvent::Advance,
            };
            state = step(engine, &state, event, rng);
            assert!(state.answered().starts_with(&previous), "log must be append-only");
            assert_invariants(engine, &state);
        }
        state
    }

    #[test]
    fn start_serves_first_category_question() {
        let engine = AssessmentEngine::standard();
        let mut rng = FixedSequence::first();
        let state = step(&engine, &engine.fresh_session(fixed_now()), SessionEvent::Start, &mut rng);

        assert_eq!(state.phase(), Phase::Question);
        let question = engine.current_question(&state).unwrap();
        assert_eq!(question.category, CategoryKey::Budgeting);
        assert_eq!(question.difficulty, Difficulty::MEDIUM);
        assert_eq!(question.id, QuestionId::new(104));
    }

    #[test]
    fn start_is_idempotent_mid_session() {
        let engine = AssessmentEngine::standard();
        let mut rng = RngSource::seeded(3);
        let started = step(&engine, &engine.fresh_session(fixed_now()), SessionEvent::Start, &mut rng);
        let again = step(&engine, &started, SessionEvent::Start, &mut rng);
        assert_eq!(again, started);

        let answered = step(&engine, &started, SessionEvent::Answer { choice: 0 }, &mut rng);
        let resumed = step(&engine, &answered, SessionEvent::Start, &mut rng);
        assert_eq!(resumed, answered);
    }

    #[test]
    fn reduce_leaves_input_untouched() {
        let engine = AssessmentEngine::standard();
        let mut rng = FixedSequence::first();
        let fresh = engine.fresh_session(fixed_now());
        let snapshot = fresh.clone();
        let _ = step(&engine, &fresh, SessionEvent::Start, &mut rng);
        assert_eq!(fresh, snapshot);
    }

    #[test]
    fn answer_records_and_adapts_difficulty() {
        let engine = AssessmentEngine::standard();
        let mut rng = FixedSequence::first();
        let state = step(&engine, &engine.fresh_session(fixed_now()), SessionEvent::Start, &mut rng);
        let id = state.current_question_id().unwrap();
        let choice = correct_choice(&engine, &state);

        let state = step(&engine, &state, SessionEvent::Answer { choice }, &mut rng);
        assert_eq!(state.phase(), Phase::Feedback);
        assert_eq!(state.last_chosen_index(), Some(choice));
        assert!(state.used_question_ids().contains(&id));
        assert_eq!(state.desired_difficulty(CategoryKey::Budgeting), Difficulty::HARD);

        let record = state.last_answer().unwrap();
        assert!(record.is_correct);
        assert!((record.weight - 1.4).abs() < f64::EPSILON);

        let feedback = engine.feedback(&state).unwrap();
        assert_eq!(feedback.question.id, id);
        assert!(feedback.is_correct);

        // Next question targets the raised difficulty.
        let state = step(&engine, &state, SessionEvent::Advance, &mut rng);
        assert_eq!(state.phase(), Phase::Question);
        assert_eq!(state.last_chosen_index(), None);
        assert_eq!(engine.current_question(&state).unwrap().difficulty, Difficulty::HARD);
    }

    #[test]
    fn wrong_answer_lowers_difficulty() {
        let engine = AssessmentEngine::standard();
        let mut rng = FixedSequence::first();
        let state = step(&engine, &engine.fresh_session(fixed_now()), SessionEvent::Start, &mut rng);
        let choice = wrong_choice(&engine, &state);
        let state = step(&engine, &state, SessionEvent::Answer { choice }, &mut rng);
        assert!(!state.last_answer().unwrap().is_correct);
        assert_eq!(state.desired_difficulty(CategoryKey::Budgeting), Difficulty::EASY);
    }

    #[test]
    fn rejects_events_outside_their_phase() {
        let engine = AssessmentEngine::standard();
        let mut rng = FixedSequence::first();
        let fresh = engine.fresh_session(fixed_now());

        let err = engine
            .reduce(&fresh, SessionEvent::Answer { choice: 0 }, &mut rng)
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { phase: Phase::Intro, .. }));
        let err = engine.reduce(&fresh, SessionEvent::Advance, &mut rng).unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { phase: Phase::Intro, .. }));

        let started = step(&engine, &fresh, SessionEvent::Start, &mut rng);
        let err = engine
            .reduce(&started, SessionEvent::Answer { choice: 4 }, &mut rng)
            .unwrap_err();
        assert_eq!(err, SessionError::ChoiceOutOfRange(4));
        let err = engine.reduce(&started, SessionEvent::Advance, &mut rng).unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { phase: Phase::Question, .. }));
    }

    #[test]
    fn category_completes_after_questions_to_ask() {
        let engine = AssessmentEngine::standard();
        let mut rng = FixedSequence::first();
        let mut state =
            step(&engine, &engine.fresh_session(fixed_now()), SessionEvent::Start, &mut rng);

        for answered in 1..=5 {
            let choice = correct_choice(&engine, &state);
            state = step(&engine, &state, SessionEvent::Answer { choice }, &mut rng);
            state = step(&engine, &state, SessionEvent::Advance, &mut rng);
            if answered < 5 {
                assert_eq!(state.phase(), Phase::Question);
            }
        }
        assert_eq!(state.phase(), Phase::CategorySummary);
        assert_eq!(state.current_question_id(), None);
        assert!(engine.category_complete(&state, CategoryKey::Budgeting));
        assert!(!engine.category_complete(&state, CategoryKey::Debt));

        let summary = engine.category_summary(&state).unwrap();
        assert_eq!(summary.category, CategoryKey::Budgeting);
        assert_eq!(summary.score, 100);
        assert_eq!(summary.correct, 5);
        assert!(!summary.is_last);

        let state = step(&engine, &state, SessionEvent::Advance, &mut rng);
        assert_eq!(state.phase(), Phase::Question);
        assert_eq!(state.current_category_index(), 1);
        assert_eq!(engine.current_question(&state).unwrap().category, CategoryKey::Debt);
    }

    #[test]
    fn depleted_pool_shows_placeholder_then_completes_category() {
        let engine = AssessmentEngine::standard();
        let mut rng = FixedSequence::first();
        let mut state = engine.fresh_session(fixed_now());
        // A snapshot whose used set already covers the whole first category.
        state.used_question_ids = engine
            .bank()
            .questions_of(CategoryKey::Budgeting)
            .map(|q| q.id)
            .collect();

        let state = step(&engine, &state, SessionEvent::Start, &mut rng);
        assert_eq!(state.phase(), Phase::Question);
        assert!(engine.is_placeholder(&state));

        let err = engine
            .reduce(&state, SessionEvent::Answer { choice: 0 }, &mut rng)
            .unwrap_err();
        assert_eq!(err, SessionError::NoCurrentQuestion);

        let state = step(&engine, &state, SessionEvent::Advance, &mut rng);
        assert_eq!(state.phase(), Phase::CategorySummary);
        assert_eq!(engine.category_summary(&state).unwrap().score, 0);

        let state = step(&engine, &state, SessionEvent::Advance, &mut rng);
        assert_eq!(engine.current_question(&state).unwrap().category, CategoryKey::Debt);
    }

    #[test]
    fn last_category_summary_advances_to_results() {
        let engine = AssessmentEngine::standard();
        let mut rng = RngSource::seeded(11);
        let state = run_to_results(&engine, engine.fresh_session(fixed_now()), &mut rng, correct_choice);
        assert_eq!(state.phase(), Phase::Results);
        assert_eq!(state.answered().len(), 25);
        assert!(state.needs_submission());
        assert!(engine.results(&state).is_some());

        let err = engine.reduce(&state, SessionEvent::Advance, &mut rng).unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { phase: Phase::Results, .. }));
    }

    #[test]
    fn self_level_resets_difficulties_before_first_answer() {
        let engine = AssessmentEngine::standard();
        let mut rng = FixedSequence::first();
        let fresh = engine.fresh_session(fixed_now());

        let intro = step(&engine, &fresh, SessionEvent::ChangeSelfLevel(SelfLevel::Pro), &mut rng);
        assert_eq!(intro.phase(), Phase::Intro);
        assert_eq!(intro.self_level(), Some(SelfLevel::Pro));
        assert!(intro.per_category_difficulty().values().all(|d| *d == Difficulty::HARD));

        let started = step(&engine, &intro, SessionEvent::Start, &mut rng);
        assert_eq!(engine.current_question(&started).unwrap().difficulty, Difficulty::HARD);
        let on_screen = started.current_question_id();

        // Switching mid-question keeps the phase, the question and the used set.
        let switched =
            step(&engine, &started, SessionEvent::ChangeSelfLevel(SelfLevel::Starter), &mut rng);
        assert_eq!(switched.phase(), Phase::Question);
        assert_eq!(switched.current_question_id(), on_screen);
        assert_eq!(switched.used_question_ids(), started.used_question_ids());
        assert!(switched.used_question_ids().is_empty());
        assert!(switched.per_category_difficulty().values().all(|d| *d == Difficulty::EASY));
    }

    #[test]
    fn self_level_is_locked_after_first_answer() {
        let engine = AssessmentEngine::standard();
        let mut rng = FixedSequence::first();
        let state = step(&engine, &engine.fresh_session(fixed_now()), SessionEvent::Start, &mut rng);
        let state = step(&engine, &state, SessionEvent::Answer { choice: 0 }, &mut rng);

        let err = engine
            .reduce(&state, SessionEvent::ChangeSelfLevel(SelfLevel::Pro), &mut rng)
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { phase: Phase::Feedback, .. }));

        let state = step(&engine, &state, SessionEvent::Advance, &mut rng);
        let err = engine
            .reduce(&state, SessionEvent::ChangeSelfLevel(SelfLevel::Pro), &mut rng)
            .unwrap_err();
        assert_eq!(err, SessionError::SelfLevelLocked);
    }

    #[test]
    fn reset_returns_a_fresh_intro_from_any_phase() {
        let engine = AssessmentEngine::standard();
        let mut rng = RngSource::seeded(5);
        let mut done =
            run_to_results(&engine, engine.fresh_session(fixed_now()), &mut rng, wrong_choice);
        assert!(done.mark_submitted());

        let later = fixed_now() + chrono::Duration::hours(1);
        let reset = step(&engine, &done, SessionEvent::Reset { started_at: later }, &mut rng);
        assert_eq!(reset, engine.fresh_session(later));
        assert!(!reset.is_submitted());

        let started = step(&engine, &reset, SessionEvent::Start, &mut rng);
        let reset_mid = step(&engine, &started, SessionEvent::Reset { started_at: later }, &mut rng);
        assert_eq!(reset_mid.phase(), Phase::Intro);
        assert!(reset_mid.answered().is_empty());
    }

    #[test]
    fn all_correct_at_hardest_difficulty_scores_top() {
        let engine = AssessmentEngine::standard();
        let mut rng = FixedSequence::first();
        let fresh = engine.fresh_session(fixed_now());
        let pro = step(&engine, &fresh, SessionEvent::ChangeSelfLevel(SelfLevel::Pro), &mut rng);

        let state = run_to_results(&engine, pro, &mut rng, |engine, state| {
            assert!(
                state.per_category_difficulty().values().all(|d| *d == Difficulty::HARD),
                "desired difficulty must stay at the top"
            );
            correct_choice(engine, state)
        });

        let report = engine.results(&state).unwrap();
        assert_eq!(report.answered_count, 25);
        assert!(report.category_scores.iter().all(|s| s.score == 100));
        assert_eq!(report.final_score, 100);
        assert_eq!(report.tier, LevelTier::Advanced);
        assert_eq!(report.confidence, 100);

        // Two hard questions per category, then the pool falls back through medium to easy.
        let served: Vec<_> = state
            .answered()
            .iter()
            .filter(|r| r.category == CategoryKey::Saving)
            .map(|r| r.difficulty.value())
            .collect();
        assert_eq!(served, vec![3, 3, 2, 2, 1]);
    }

    #[test]
    fn all_wrong_in_one_category_scores_zero() {
        let engine = AssessmentEngine::standard();
        let mut rng = FixedSequence::first();
        let mut state =
            step(&engine, &engine.fresh_session(fixed_now()), SessionEvent::Start, &mut rng);
        while state.phase() != Phase::CategorySummary {
            let choice = wrong_choice(&engine, &state);
            state = step(&engine, &state, SessionEvent::Answer { choice }, &mut rng);
            state = step(&engine, &state, SessionEvent::Advance, &mut rng);
        }

        assert_eq!(state.answered_in(CategoryKey::Budgeting), 5);
        assert_eq!(state.desired_difficulty(CategoryKey::Budgeting), Difficulty::EASY);
        let report = engine.report(&state);
        assert_eq!(report.score_of(CategoryKey::Budgeting), Some(0));
        assert_eq!(report.final_score, 0);
        assert_eq!(report.answered_count, 5);
    }

    #[test]
    fn random_sessions_keep_invariants() {
        let engine = AssessmentEngine::standard();
        for seed in 0..40 {
            let mut rng = RngSource::seeded(seed);
            let mut chooser = StdRng::seed_from_u64(seed + 1_000);
            let state = run_to_results(&engine, engine.fresh_session(fixed_now()), &mut rng, |_, _| {
                chooser.random_range(0..OPTION_COUNT)
            });
            let report = engine.results(&state).unwrap();
            assert!(report.final_score <= 100);
            assert!((10..=100).contains(&report.confidence));
        }
    }

    #[test]
    fn same_fixed_sequence_gives_same_question_order() {
        let engine = AssessmentEngine::standard();
        let order = |picks: Vec<usize>| {
            let mut rng = FixedSequence::new(picks);
            let state =
                run_to_results(&engine, engine.fresh_session(fixed_now()), &mut rng, correct_choice);
            state.answered().iter().map(|r| r.question_id).collect::<Vec<_>>()
        };
        assert_eq!(order(vec![1, 0, 2]), order(vec![1, 0, 2]));
        assert_ne!(order(vec![0]), order(vec![1]));
    }
}
