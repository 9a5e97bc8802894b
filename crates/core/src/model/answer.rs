use serde::{Deserialize, Serialize};

use crate::model::category::CategoryKey;
use crate::model::ids::QuestionId;
use crate::model::question::{Difficulty, Question};

/// Record of a single answered question.
///
/// Appended once to the session log and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsweredRecord {
    pub question_id: QuestionId,
    pub category: CategoryKey,
    pub difficulty: Difficulty,
    pub is_correct: bool,
    pub correct_index: usize,
    pub chosen_index: usize,
    pub weight: f64,
}

impl AnsweredRecord {
    /// Grades `chosen_index` against the question and captures the weight of its difficulty.
    #[must_use]
    pub fn grade(question: &Question, chosen_index: usize) -> Self {
        Self {
            question_id: question.id,
            category: question.category,
            difficulty: question.difficulty,
            is_correct: question.is_correct(chosen_index),
            correct_index: question.correct_index,
            chosen_index,
            weight: question.difficulty.weight(),
        }
    }
}
