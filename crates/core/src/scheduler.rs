use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bank::QuestionBank;
use crate::model::{CategoryKey, Difficulty, Question, QuestionId};

//
// ─── RANDOM SOURCE ─────────────────────────────────────────────────────────────
//

/// Tie-break source for picking among equally preferred candidates.
///
/// Injected into every selection so tests can fix the exact question order.
pub trait RandomSource {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Adapter from any `rand::Rng` to a `RandomSource`.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    /// Deterministic source for reproducible sessions.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the thread-local generator.
    #[must_use]
    pub fn from_thread_rng() -> Self {
        Self(StdRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }
}

/// Replays a fixed list of picks, wrapping around; each pick is reduced modulo `len`.
///
/// An empty list always picks the first candidate.
#[derive(Debug, Clone, Default)]
pub struct FixedSequence {
    picks: Vec<usize>,
    cursor: usize,
}

impl FixedSequence {
    #[must_use]
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        Self {
            picks: picks.into(),
            cursor: 0,
        }
    }

    /// Always picks the first candidate in catalog order.
    #[must_use]
    pub fn first() -> Self {
        Self::default()
    }
}

impl RandomSource for FixedSequence {
    fn pick_index(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        pick % len
    }
}

//
// ─── SCHEDULER ─────────────────────────────────────────────────────────────────
//

/// Which preference tier produced the candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateTier {
    /// Unused questions at exactly the desired difficulty.
    Exact,
    /// Unused questions one step easier or harder, pooled.
    Adjacent,
    /// Any unused question left in the category.
    Remaining,
}

/// First non-empty candidate pool for a category, in catalog order.
#[derive(Debug, Clone)]
pub struct CandidatePool<'a> {
    pub tier: CandidateTier,
    pub questions: Vec<&'a Question>,
}

/// Picks the next unused question of a category, preferring the desired difficulty.
#[derive(Debug, Clone, Copy)]
pub struct CategoryScheduler<'a> {
    bank: &'a QuestionBank,
}

impl<'a> CategoryScheduler<'a> {
    #[must_use]
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self { bank }
    }

    /// Candidate pool by ordered preference: exact difficulty, then the
    /// adjacent levels (clamped to `1..=3`), then anything unused.
    ///
    /// Returns `None` when every question of the category has been used.
    #[must_use]
    pub fn candidates(
        &self,
        category: CategoryKey,
        desired: Difficulty,
        used: &BTreeSet<QuestionId>,
    ) -> Option<CandidatePool<'a>> {
        let unused: Vec<&'a Question> = self
            .bank
            .questions_of(category)
            .filter(|q| !used.contains(&q.id))
            .collect();
        if unused.is_empty() {
            return None;
        }

        let exact: Vec<_> = unused
            .iter()
            .copied()
            .filter(|q| q.difficulty == desired)
            .collect();
        if !exact.is_empty() {
            return Some(CandidatePool {
                tier: CandidateTier::Exact,
                questions: exact,
            });
        }

        let (easier, harder) = (desired.easier(), desired.harder());
        let adjacent: Vec<_> = unused
            .iter()
            .copied()
            .filter(|q| q.difficulty != desired && (q.difficulty == easier || q.difficulty == harder))
            .collect();
        if !adjacent.is_empty() {
            return Some(CandidatePool {
                tier: CandidateTier::Adjacent,
                questions: adjacent,
            });
        }

        Some(CandidatePool {
            tier: CandidateTier::Remaining,
            questions: unused,
        })
    }

    /// Pick the next question id, breaking ties uniformly through `rng`.
    ///
    /// `None` means the category pool is depleted; whether the category is
    /// also complete by count is for the caller to decide.
    pub fn pick_next(
        &self,
        category: CategoryKey,
        desired: Difficulty,
        used: &BTreeSet<QuestionId>,
        rng: &mut dyn RandomSource,
    ) -> Option<QuestionId> {
        let pool = self.candidates(category, desired, used)?;
        let index = rng.pick_index(pool.questions.len());
        pool.questions.get(index).map(|q| q.id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
