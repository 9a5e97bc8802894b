use std::fmt::Write as _;

use quiz_core::model::{Phase, SelfLevel};
use services::{AssessmentView, SubmissionStatus};
use storage::repository::StoredResult;

const RULE: &str = "────────────────────────────────────────────────────────";

pub fn help() -> String {
    let levels: Vec<_> = SelfLevel::ALL.iter().map(|l| l.as_str()).collect();
    format!(
        "Commands:\n  1-4            pick an answer\n  n              start / next\n  level <name>   set your level before the first answer ({})\n  history        list saved results\n  reset          start over\n  q              quit",
        levels.join(", ")
    )
}

/// Text for the screen matching `view.phase`.
pub fn render(view: &AssessmentView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    match view.phase {
        Phase::Intro => render_intro(&mut out, view),
        Phase::Question => render_question(&mut out, view),
        Phase::Feedback => render_feedback(&mut out, view),
        Phase::CategorySummary => render_category_summary(&mut out, view),
        Phase::Results => render_results(&mut out, view),
    }
    out
}

fn render_intro(out: &mut String, view: &AssessmentView) {
    let _ = writeln!(out, "Financial literacy check");
    let _ = writeln!(
        out,
        "{} questions across {} topics. Questions adapt to your answers.",
        view.progress.expected_total, view.progress.category_count
    );
    match view.self_level {
        Some(level) => {
            let _ = writeln!(out, "Your level: {level}");
        }
        None => {
            let _ = writeln!(out, "Tell us your level with `level <starter|learning|familiar|pro>`.");
        }
    }
    let _ = writeln!(out, "Type `n` to begin.");
}

fn progress_line(out: &mut String, view: &AssessmentView) {
    let p = &view.progress;
    let _ = writeln!(
        out,
        "[{}%] {} ({}/{}), question {} of {}",
        p.percent(),
        view.category_title.unwrap_or_default(),
        p.category_index + 1,
        p.category_count,
        (p.answered_in_category + 1).min(p.questions_in_category),
        p.questions_in_category
    );
}

fn render_question(out: &mut String, view: &AssessmentView) {
    progress_line(out, view);
    let Some(question) = &view.question else {
        let _ = writeln!(out, "No more questions are available in this topic. Type `n` to continue.");
        return;
    };
    let _ = writeln!(out, "\n{}\n", question.text);
    for (i, option) in question.options.iter().enumerate() {
        let _ = writeln!(out, "  {}. {option}", i + 1);
    }
}

fn render_feedback(out: &mut String, view: &AssessmentView) {
    let (Some(question), Some(feedback)) = (&view.question, &view.feedback) else {
        return;
    };
    let verdict = if feedback.is_correct { "Correct!" } else { "Not quite." };
    let _ = writeln!(out, "{verdict}");
    if !feedback.is_correct {
        let _ = writeln!(
            out,
            "You chose {}. The answer is {}. {}",
            feedback.chosen_index + 1,
            feedback.correct_index + 1,
            question.options[feedback.correct_index]
        );
    }
    let _ = writeln!(out, "{}", feedback.explanation_short);
    if let Some(more) = feedback.explanation_more {
        let _ = writeln!(out, "{more}");
    }
    let _ = writeln!(out, "Type `n` for the next question.");
}

fn render_category_summary(out: &mut String, view: &AssessmentView) {
    let Some(summary) = &view.category_summary else {
        return;
    };
    let _ = writeln!(out, "{} done", summary.title);
    let _ = writeln!(
        out,
        "{} of {} correct, topic score {}/100",
        summary.correct, summary.answered, summary.score
    );
    let next = if summary.is_last { "see your results" } else { "continue" };
    let _ = writeln!(out, "Type `n` to {next}.");
}

fn render_results(out: &mut String, view: &AssessmentView) {
    let Some(report) = &view.report else {
        return;
    };
    let _ = writeln!(out, "Your score: {}/100 ({})", report.final_score, report.tier.label());
    let _ = writeln!(out, "{}", report.tier.description());
    let _ = writeln!(out, "Confidence: {}%\n", report.confidence);

    for score in &report.category_scores {
        let _ = writeln!(out, "  {:<16} {:>3}", score.category.as_str(), score.score);
    }

    if !report.strengths.is_empty() {
        let names: Vec<_> = report.strengths.iter().map(|s| s.category.as_str()).collect();
        let _ = writeln!(out, "\nStrengths: {}", names.join(", "));
    }
    if !report.growth_areas.is_empty() {
        let names: Vec<_> = report.growth_areas.iter().map(|s| s.category.as_str()).collect();
        let _ = writeln!(out, "Growth areas: {}", names.join(", "));
    }

    let _ = writeln!(out, "\nInsights:");
    for insight in &report.insights {
        let _ = writeln!(out, "  - {insight}");
    }

    let _ = writeln!(out, "\nYour next steps:");
    for (i, step) in report.action_plan.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}: {}", i + 1, step.title, step.text);
    }

    if let Some(status) = view.submission {
        let _ = writeln!(out, "\n{}", status.label());
        if status == SubmissionStatus::Failed {
            let _ = writeln!(out, "Your results are still shown above.");
        }
    }
    let _ = writeln!(out, "Type `reset` to start over or `q` to quit.");
}

pub fn render_history(results: &[StoredResult]) -> String {
    if results.is_empty() {
        return "No saved results yet.".to_owned();
    }
    results
        .iter()
        .map(|r| {
            format!(
                "#{} {}  {}",
                r.id,
                r.submission.submitted_at.format("%Y-%m-%d %H:%M"),
                r.submission.summary
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
