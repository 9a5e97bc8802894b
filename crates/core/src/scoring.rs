//! Pure scoring over an answer log.

use std::collections::BTreeSet;

use crate::model::{AnsweredRecord, CategoryConfig, CategoryKey, LevelTier};

/// Score of a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryScore {
    pub category: CategoryKey,
    pub score: u8,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_percent(ratio_times_100: f64) -> u8 {
    if !ratio_times_100.is_finite() {
        return 0;
    }
    ratio_times_100.round().clamp(0.0, 100.0) as u8
}

/// Weighted share of correct answers in `category`, as a percentage.
///
/// A category without answers scores `0`.
#[must_use]
pub fn score_category(answered: &[AnsweredRecord], category: CategoryKey) -> u8 {
    let (correct, total) = answered
        .iter()
        .filter(|record| record.category == category)
        .fold((0.0_f64, 0.0_f64), |(correct, total), record| {
            let gained = if record.is_correct { record.weight } else { 0.0 };
            (correct + gained, total + record.weight)
        });

    if total <= 0.0 {
        return 0;
    }
    to_percent(100.0 * correct / total)
}

/// Scores for every configured category, in configuration order.
#[must_use]
pub fn score_categories(
    answered: &[AnsweredRecord],
    categories: &[CategoryConfig],
) -> Vec<CategoryScore> {
    categories
        .iter()
        .map(|config| CategoryScore {
            category: config.key,
            score: score_category(answered, config.key),
        })
        .collect()
}

/// Weighted mean of category scores using each category's configured weight.
///
/// Categories without a score are left out of both sums.
#[must_use]
pub fn final_score(scores: &[CategoryScore], categories: &[CategoryConfig]) -> u8 {
    let (weighted, weights) = categories.iter().fold((0.0_f64, 0.0_f64), |acc, config| {
        match scores.iter().find(|s| s.category == config.key) {
            Some(s) => (acc.0 + f64::from(s.score) * config.weight, acc.1 + config.weight),
            None => acc,
        }
    });

    if weights <= 0.0 {
        return 0;
    }
    to_percent(weighted / weights)
}

/// Evidence behind the composite score: answer volume and difficulty coverage.
///
/// Always within `10..=100`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn confidence(total_answered: usize, expected_total: usize, distinct_difficulties: usize) -> u8 {
    let count_factor = if expected_total == 0 {
        0.0
    } else {
        (total_answered as f64 / expected_total as f64).min(1.0)
    };
    let coverage_factor = (distinct_difficulties as f64 / 3.0).min(1.0);
    let raw = to_percent((0.65 * count_factor + 0.35 * coverage_factor) * 100.0);
    raw.clamp(10, 100)
}

/// Number of distinct difficulty levels present in the log.
#[must_use]
pub fn distinct_difficulties(answered: &[AnsweredRecord]) -> usize {
    answered
        .iter()
        .map(|record| record.difficulty)
        .collect::<BTreeSet<_>>()
        .len()
}

#[must_use]
pub fn level_label(final_score: u8) -> LevelTier {
    LevelTier::from_score(final_score)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::STANDARD_CATEGORIES;
    use crate::model::{Difficulty, QuestionId};

    fn record(id: u64, category: CategoryKey, difficulty: Difficulty, correct: bool) -> AnsweredRecord {
        AnsweredRecord {
            question_id: QuestionId::new(id),
            category,
            difficulty,
            is_correct: correct,
            correct_index: 0,
            chosen_index: if correct { 0 } else { 1 },
            weight: difficulty.weight(),
        }
    }

    #[test]
    fn empty_category_scores_zero() {
        assert_eq!(score_category(&[], CategoryKey::Debt), 0);
        let log = vec![record(1, CategoryKey::Saving, Difficulty::EASY, true)];
        assert_eq!(score_category(&log, CategoryKey::Debt), 0);
    }

    #[test]
    fn category_score_is_weighted_by_difficulty() {
        // correct hard (1.8) + wrong easy (1.0): 1.8 / 2.8 = 64.28..
        let log = vec![
            record(1, CategoryKey::Debt, Difficulty::HARD, true),
            record(2, CategoryKey::Debt, Difficulty::EASY, false),
        ];
        assert_eq!(score_category(&log, CategoryKey::Debt), 64);

        // correct easy (1.0) + wrong hard (1.8): 1.0 / 2.8 = 35.7..
        let log = vec![
            record(1, CategoryKey::Debt, Difficulty::EASY, true),
            record(2, CategoryKey::Debt, Difficulty::HARD, false),
        ];
        assert_eq!(score_category(&log, CategoryKey::Debt), 36);
    }

    #[test]
    fn all_correct_and_all_wrong_hit_the_bounds() {
        let right: Vec<_> = (0..5)
            .map(|i| record(i, CategoryKey::Saving, Difficulty::MEDIUM, true))
            .collect();
        let wrong: Vec<_> = (0..5)
            .map(|i| record(i, CategoryKey::Saving, Difficulty::MEDIUM, false))
            .collect();
        assert_eq!(score_category(&right, CategoryKey::Saving), 100);
        assert_eq!(score_category(&wrong, CategoryKey::Saving), 0);
    }

    #[test]
    fn final_score_uses_category_weights() {
        let scores = vec![
            CategoryScore { category: CategoryKey::Budgeting, score: 100 },
            CategoryScore { category: CategoryKey::Debt, score: 0 },
            CategoryScore { category: CategoryKey::Saving, score: 0 },
            CategoryScore { category: CategoryKey::Investing, score: 0 },
            CategoryScore { category: CategoryKey::CrisisPlanning, score: 0 },
        ];
        // 100 * 1.2 / 5.0 = 24
        assert_eq!(final_score(&scores, &STANDARD_CATEGORIES), 24);
    }

    #[test]
    fn final_score_skips_unscored_categories_and_handles_empty() {
        let scores = vec![CategoryScore { category: CategoryKey::Debt, score: 70 }];
        assert_eq!(final_score(&scores, &STANDARD_CATEGORIES), 70);
        assert_eq!(final_score(&[], &STANDARD_CATEGORIES), 0);
    }

    #[test]
    fn confidence_combines_volume_and_coverage() {
        assert_eq!(confidence(25, 25, 3), 100);
        // 0.65 * 1.0 + 0.35 * (1/3) = 0.7666..
        assert_eq!(confidence(25, 25, 1), 77);
        // 0.65 * 0.4 + 0.35 * (2/3) = 0.4933..
        assert_eq!(confidence(10, 25, 2), 49);
    }

    #[test]
    fn confidence_is_clamped_to_floor() {
        assert_eq!(confidence(0, 25, 0), 10);
        assert_eq!(confidence(0, 0, 0), 10);
        assert_eq!(confidence(1, 25, 0), 10);
    }

    #[test]
    fn confidence_saturates_when_over_answered() {
        assert_eq!(confidence(40, 25, 9), 100);
    }

    #[test]
    fn distinct_difficulties_counts_levels() {
        let log = vec![
            record(1, CategoryKey::Debt, Difficulty::HARD, true),
            record(2, CategoryKey::Saving, Difficulty::HARD, false),
            record(3, CategoryKey::Saving, Difficulty::EASY, false),
        ];
        assert_eq!(distinct_difficulties(&log), 2);
        assert_eq!(distinct_difficulties(&[]), 0);
    }

    #[test]
    fn level_label_matches_tiers() {
        assert_eq!(level_label(100), LevelTier::Advanced);
        assert_eq!(level_label(0), LevelTier::Foundational);
    }
}
