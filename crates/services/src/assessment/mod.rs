mod submission;
mod view;
mod workflow;

// Public API of the assessment subsystem.
pub use quiz_core::model::SubmissionStatus;
pub use view::{AssessmentView, FeedbackView, QuestionView};
pub use workflow::{AssessmentLoopService, AssessmentSession, DispatchOutcome, MEMORY_DB, open_storage};
