use std::collections::HashSet;

use thiserror::Error;

use crate::catalog::{STANDARD_CATEGORIES, STANDARD_QUESTIONS};
use crate::model::{CategoryConfig, CategoryKey, OPTION_COUNT, Question, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Configuration errors in the static catalog.
///
/// These are never recovered at runtime; they exist so tests and custom
/// catalogs can reject broken data up front.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog has no categories")]
    NoCategories,

    #[error("category {0} is configured twice")]
    DuplicateCategory(CategoryKey),

    #[error("category {0} has a non-positive or non-finite weight")]
    InvalidWeight(CategoryKey),

    #[error("category {0} asks zero questions")]
    NothingToAsk(CategoryKey),

    #[error("category {0} has no questions")]
    EmptyCategory(CategoryKey),

    #[error("category {category} asks {questions_to_ask} questions but only {pool} exist")]
    PoolTooSmall {
        category: CategoryKey,
        questions_to_ask: usize,
        pool: usize,
    },

    #[error("question id {0} is used more than once")]
    DuplicateQuestion(QuestionId),

    #[error("question {question} belongs to unconfigured category {category}")]
    UnknownCategory {
        question: QuestionId,
        category: CategoryKey,
    },

    #[error("question {question} marks option {index} as correct but has only four options")]
    CorrectIndexOutOfRange { question: QuestionId, index: usize },
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// Read-only catalog of categories and their questions.
///
/// Category order is the order the assessment walks through them.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    categories: Vec<CategoryConfig>,
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a validated bank from custom data.
    ///
    /// # Errors
    ///
    /// Returns the first `CatalogError` found in the data.
    pub fn new(
        categories: Vec<CategoryConfig>,
        questions: Vec<Question>,
    ) -> Result<Self, CatalogError> {
        let bank = Self {
            categories,
            questions,
        };
        bank.validate()?;
        Ok(bank)
    }

    /// The built-in financial-literacy catalog.
    ///
    /// The static data is covered by tests rather than re-validated here.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            categories: STANDARD_CATEGORIES.to_vec(),
            questions: STANDARD_QUESTIONS.to_vec(),
        }
    }

    /// Check every catalog invariant.
    ///
    /// # Errors
    ///
    /// Returns the first `CatalogError` found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.categories.is_empty() {
            return Err(CatalogError::NoCategories);
        }

        let mut keys = HashSet::new();
        for config in &self.categories {
            if !keys.insert(config.key) {
                return Err(CatalogError::DuplicateCategory(config.key));
            }
            if !config.weight.is_finite() || config.weight <= 0.0 {
                return Err(CatalogError::InvalidWeight(config.key));
            }
            if config.questions_to_ask == 0 {
                return Err(CatalogError::NothingToAsk(config.key));
            }
        }

        let mut ids = HashSet::new();
        for question in &self.questions {
            if !ids.insert(question.id) {
                return Err(CatalogError::DuplicateQuestion(question.id));
            }
            if !keys.contains(&question.category) {
                return Err(CatalogError::UnknownCategory {
                    question: question.id,
                    category: question.category,
                });
            }
            if question.correct_index >= OPTION_COUNT {
                return Err(CatalogError::CorrectIndexOutOfRange {
                    question: question.id,
                    index: question.correct_index,
                });
            }
        }

        for config in &self.categories {
            let pool = self.pool_size(config.key);
            if pool == 0 {
                return Err(CatalogError::EmptyCategory(config.key));
            }
            if config.questions_to_ask > pool {
                return Err(CatalogError::PoolTooSmall {
                    category: config.key,
                    questions_to_ask: config.questions_to_ask,
                    pool,
                });
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn categories(&self) -> &[CategoryConfig] {
        &self.categories
    }

    #[must_use]
    pub fn category(&self, key: CategoryKey) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.key == key)
    }

    #[must_use]
    pub fn category_at(&self, index: usize) -> Option<&CategoryConfig> {
        self.categories.get(index)
    }

    /// Questions of a category, in catalog order.
    pub fn questions_of(&self, category: CategoryKey) -> impl Iterator<Item = &Question> + '_ {
        self.questions.iter().filter(move |q| q.category == category)
    }

    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    #[must_use]
    pub fn pool_size(&self, category: CategoryKey) -> usize {
        self.questions_of(category).count()
    }

    /// Total number of questions a complete session answers.
    #[must_use]
    pub fn expected_total(&self) -> usize {
        self.categories.iter().map(|c| c.questions_to_ask).sum()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::standard()
    }
}
