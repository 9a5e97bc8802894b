use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::category::CategoryKey;
use crate::model::ids::QuestionId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DifficultyError {
    #[error("difficulty must be between 1 and 3, got {0}")]
    OutOfRange(u8),
}

//
// ─── DIFFICULTY ───────────────────────────────────────────────────────────────
//

/// Difficulty level of a question, always within `1..=3`.
///
/// The level drives both the adaptive selection rule and the scoring weight
/// of an answer (`1 → 1.0`, `2 → 1.4`, `3 → 1.8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const EASY: Self = Self(1);
    pub const MEDIUM: Self = Self(2);
    pub const HARD: Self = Self(3);

    /// All levels in ascending order.
    pub const ALL: [Self; 3] = [Self::EASY, Self::MEDIUM, Self::HARD];

    /// Converts a raw level to a `Difficulty`.
    ///
    /// # Errors
    ///
    /// Returns `DifficultyError::OutOfRange` if the value is not in `1..=3`.
    pub fn new(value: u8) -> Result<Self, DifficultyError> {
        match value {
            1..=3 => Ok(Self(value)),
            _ => Err(DifficultyError::OutOfRange(value)),
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Scoring weight applied to an answer at this level.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self.0 {
            1 => 1.0,
            2 => 1.4,
            _ => 1.8,
        }
    }

    /// One level harder, saturating at `HARD`.
    #[must_use]
    pub const fn harder(self) -> Self {
        if self.0 >= 3 { Self::HARD } else { Self(self.0 + 1) }
    }

    /// One level easier, saturating at `EASY`.
    #[must_use]
    pub const fn easier(self) -> Self {
        if self.0 <= 1 { Self::EASY } else { Self(self.0 - 1) }
    }

    /// Next desired level after an answer: up on a correct answer, down otherwise.
    #[must_use]
    pub const fn adapt(self, correct: bool) -> Self {
        if correct { self.harder() } else { self.easier() }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = DifficultyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice question.
///
/// Questions are static catalog entries: built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub category: CategoryKey,
    pub difficulty: Difficulty,
    pub text: &'static str,
    pub options: [&'static str; OPTION_COUNT],
    pub correct_index: usize,
    pub explanation_short: &'static str,
    pub explanation_more: Option<&'static str>,
}

impl Question {
    /// Builds a catalog entry. Index ranges are checked by `QuestionBank::new`.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub const fn new(
        id: u64,
        category: CategoryKey,
        difficulty: Difficulty,
        text: &'static str,
        options: [&'static str; OPTION_COUNT],
        correct_index: usize,
        explanation_short: &'static str,
        explanation_more: Option<&'static str>,
    ) -> Self {
        Self {
            id: QuestionId::new(id),
            category,
            difficulty,
            text,
            options,
            correct_index,
            explanation_short,
            explanation_more,
        }
    }

    #[must_use]
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}
