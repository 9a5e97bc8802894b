use chrono::{DateTime, Utc};
use quiz_core::model::SessionState;
use quiz_core::AssessmentReport;
use storage::repository::ResultSubmission;

use crate::settings::AssessmentSettings;

pub(crate) fn build_submission(
    settings: &AssessmentSettings,
    report: &AssessmentReport,
    state: &SessionState,
    submitted_at: DateTime<Utc>,
) -> ResultSubmission {
    ResultSubmission {
        tool_id: settings.tool_id.clone(),
        version: settings.version,
        summary: report.summary_line(),
        raw_data: report.raw_data(state.started_at(), state.self_level()),
        submitted_at,
    }
}
