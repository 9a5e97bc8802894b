#![forbid(unsafe_code)]

pub mod bank;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod insights;
pub mod model;
pub mod progress;
pub mod report;
pub mod scheduler;
pub mod scoring;
pub mod time;

pub use bank::{CatalogError, QuestionBank};
pub use engine::{AssessmentEngine, Feedback, SessionError, SessionEvent};
pub use error::Error;
pub use progress::{CategorySummary, Progress};
pub use report::{AssessmentReport, RawResultData};
pub use scheduler::{CategoryScheduler, FixedSequence, RandomSource, RngSource};
pub use time::Clock;
