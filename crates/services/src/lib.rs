#![forbid(unsafe_code)]

pub mod assessment;
pub mod error;
pub mod settings;

pub use quiz_core::Clock;

pub use assessment::{
    AssessmentLoopService, AssessmentSession, AssessmentView, DispatchOutcome, FeedbackView,
    MEMORY_DB, QuestionView, SubmissionStatus, open_storage,
};
pub use error::AssessmentServiceError;
pub use settings::AssessmentSettings;
