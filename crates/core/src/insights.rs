//! Qualitative read-outs derived from category and composite scores.

use crate::model::CategoryKey;
use crate::scoring::CategoryScore;

use CategoryKey::{Budgeting, CrisisPlanning, Debt, Investing, Saving};

/// Minimum score for a category to count as a strength.
pub const STRENGTH_FROM: u8 = 60;
/// Scores below this are growth areas.
pub const GROWTH_BELOW: u8 = 70;
/// Most items any list in the report carries.
pub const MAX_ITEMS: usize = 3;

/// Below this a category is "low" for the pairwise rules.
const LOW_BELOW: u8 = 50;
/// From this a category is "high" for the pairwise rules.
const HIGH_FROM: u8 = 70;

/// Up to three categories scoring at least 60, best first.
#[must_use]
pub fn strengths(scores: &[CategoryScore]) -> Vec<CategoryScore> {
    let mut picked: Vec<_> = scores
        .iter()
        .copied()
        .filter(|s| s.score >= STRENGTH_FROM)
        .collect();
    picked.sort_by(|a, b| b.score.cmp(&a.score));
    picked.truncate(MAX_ITEMS);
    picked
}

/// Up to three categories scoring below 70, weakest first.
#[must_use]
pub fn growth_areas(scores: &[CategoryScore]) -> Vec<CategoryScore> {
    let mut picked: Vec<_> = scores
        .iter()
        .copied()
        .filter(|s| s.score < GROWTH_BELOW)
        .collect();
    picked.sort_by_key(|s| s.score);
    picked.truncate(MAX_ITEMS);
    picked
}

//
// ─── CROSS-CATEGORY RULES ──────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Low,
    High,
}

impl Band {
    fn matches(self, score: u8) -> bool {
        match self {
            Band::Low => score < LOW_BELOW,
            Band::High => score >= HIGH_FROM,
        }
    }
}

struct InsightRule {
    first: (CategoryKey, Band),
    second: (CategoryKey, Band),
    text: &'static str,
}

impl InsightRule {
    fn fires(&self, scores: &[CategoryScore]) -> bool {
        let holds = |(key, band): (CategoryKey, Band)| {
            scores
                .iter()
                .find(|s| s.category == key)
                .is_some_and(|s| band.matches(s.score))
        };
        holds(self.first) && holds(self.second)
    }
}

/// Evaluated in order; only the first three that fire are reported.
const RULES: [InsightRule; 8] = [
    InsightRule {
        first: (Budgeting, Band::Low),
        second: (Debt, Band::Low),
        text: "Spending and borrowing gaps tend to feed each other: without a clear budget, \
               debt fills the shortfall. Start by tracking where the money goes.",
    },
    InsightRule {
        first: (Saving, Band::Low),
        second: (CrisisPlanning, Band::Low),
        text: "With a thin cushion and no crisis plan, one surprise bill could turn into debt. \
               A small emergency fund is the quickest win.",
    },
    InsightRule {
        first: (Investing, Band::High),
        second: (Saving, Band::Low),
        text: "You understand investing well, but the savings base underneath it is shaky. \
               Secure an emergency fund before adding risk.",
    },
    InsightRule {
        first: (Debt, Band::High),
        second: (Budgeting, Band::Low),
        text: "You manage credit confidently, yet the monthly plan behind it is loose. \
               A simple budget keeps good credit habits sustainable.",
    },
    InsightRule {
        first: (Budgeting, Band::High),
        second: (Investing, Band::Low),
        text: "Your budgeting is strong. Learning how low-cost, diversified investing works \
               would put the surplus to work.",
    },
    InsightRule {
        first: (Saving, Band::High),
        second: (Investing, Band::Low),
        text: "You are a disciplined saver; part of those savings could grow faster \
               once you are comfortable with investing basics.",
    },
    InsightRule {
        first: (CrisisPlanning, Band::High),
        second: (Saving, Band::Low),
        text: "You know what to do in an emergency, but the money to act on that plan \
               still needs building up.",
    },
    InsightRule {
        first: (Debt, Band::Low),
        second: (Investing, Band::High),
        text: "Paying down expensive debt usually beats investing returns. \
               Make high-interest balances your first target.",
    },
];

const FALLBACK_INSIGHT: &str = "Your results are fairly balanced across topics. \
                                Keep building on the areas with the lowest scores.";

/// Up to three pairwise observations; one generic sentence when no rule fires.
#[must_use]
pub fn cross_category_insights(scores: &[CategoryScore]) -> Vec<&'static str> {
    let fired: Vec<_> = RULES
        .iter()
        .filter(|rule| rule.fires(scores))
        .take(MAX_ITEMS)
        .map(|rule| rule.text)
        .collect();

    if fired.is_empty() {
        vec![FALLBACK_INSIGHT]
    } else {
        fired
    }
}

//
// ─── ACTION PLAN ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionStep {
    pub title: &'static str,
    pub text: &'static str,
}

const fn step(title: &'static str, text: &'static str) -> ActionStep {
    ActionStep { title, text }
}

const FOUNDATION_PLAN: [ActionStep; 3] = [
    step(
        "Track one month",
        "Write down every expense for 30 days to see where your money really goes.",
    ),
    step(
        "Build a starter cushion",
        "Set aside a small, fixed amount each payday until you have one month of essentials.",
    ),
    step(
        "List your debts",
        "Note the balance and interest rate of every debt so you know what to tackle first.",
    ),
];

const STABILIZE_PLAN: [ActionStep; 3] = [
    step(
        "Automate saving",
        "Schedule a transfer to savings on payday so it happens before spending.",
    ),
    step(
        "Target expensive debt",
        "Put any extra money toward the highest-interest balance while paying minimums on the rest.",
    ),
    step(
        "Write a crisis checklist",
        "Collect key documents and contacts and decide which costs you would cut first.",
    ),
];

const GROWTH_PLAN: [ActionStep; 3] = [
    step(
        "Review your allocation",
        "Check that your investments match your time horizon and stay diversified.",
    ),
    step(
        "Cut costs that compound",
        "Compare fund fees and interest rates; small percentages add up over decades.",
    ),
    step(
        "Plan the long game",
        "Set concrete goals for retirement and large purchases and revisit them yearly.",
    ),
];

/// Three ordered steps picked by composite-score bucket: `<40`, `40..70`, `>=70`.
#[must_use]
pub fn action_plan(final_score: u8) -> [ActionStep; 3] {
    match final_score {
        0..40 => FOUNDATION_PLAN,
        40..70 => STABILIZE_PLAN,
        _ => GROWTH_PLAN,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: [u8; 5]) -> Vec<CategoryScore> {
        CategoryKey::ALL
            .into_iter()
            .zip(values)
            .map(|(category, score)| CategoryScore { category, score })
            .collect()
    }

    #[test]
    fn strengths_are_sorted_descending_and_capped() {
        let got = strengths(&scores([60, 90, 75, 100, 59]));
        let keys: Vec<_> = got.iter().map(|s| s.category).collect();
        assert_eq!(keys, vec![Investing, Debt, Saving]);
    }

    #[test]
    fn strengths_can_be_empty() {
        assert!(strengths(&scores([10, 20, 30, 40, 59])).is_empty());
    }

    #[test]
    fn growth_areas_are_sorted_ascending_and_capped() {
        let got = growth_areas(&scores([69, 10, 70, 40, 0]));
        let keys: Vec<_> = got.iter().map(|s| s.category).collect();
        assert_eq!(keys, vec![CrisisPlanning, Debt, Investing]);
    }

    #[test]
    fn a_category_can_be_strength_and_growth_area() {
        let s = scores([65, 100, 100, 100, 100]);
        assert!(strengths(&s).iter().all(|x| x.category != Budgeting));
        assert_eq!(growth_areas(&s)[0].category, Budgeting);
    }

    #[test]
    fn insights_fall_back_to_generic_sentence() {
        let got = cross_category_insights(&scores([60, 60, 60, 60, 60]));
        assert_eq!(got, vec![FALLBACK_INSIGHT]);
    }

    #[test]
    fn insights_follow_rule_priority_and_cap_at_three() {
        // Budgeting low, debt low, saving low, investing high, crisis low:
        // rules 1, 2, 3 and 8 fire; only the first three are reported.
        let got = cross_category_insights(&scores([10, 10, 10, 90, 10]));
        assert_eq!(got.len(), 3);
        assert_eq!(got[0], RULES[0].text);
        assert_eq!(got[1], RULES[1].text);
        assert_eq!(got[2], RULES[2].text);
    }

    #[test]
    fn single_rule_fires_alone() {
        let got = cross_category_insights(&scores([80, 60, 60, 20, 60]));
        assert_eq!(got, vec![RULES[4].text]);
    }

    #[test]
    fn missing_category_never_fires_a_rule() {
        let only_budget = vec![CategoryScore { category: Budgeting, score: 0 }];
        assert_eq!(cross_category_insights(&only_budget), vec![FALLBACK_INSIGHT]);
    }

    #[test]
    fn action_plan_buckets() {
        assert_eq!(action_plan(0), FOUNDATION_PLAN);
        assert_eq!(action_plan(39), FOUNDATION_PLAN);
        assert_eq!(action_plan(40), STABILIZE_PLAN);
        assert_eq!(action_plan(69), STABILIZE_PLAN);
        assert_eq!(action_plan(70), GROWTH_PLAN);
        assert_eq!(action_plan(100), GROWTH_PLAN);
    }
}
