mod answer;
mod category;
mod ids;
mod level;
mod question;
mod session;

pub use ids::{ParseIdError, QuestionId};

pub use answer::AnsweredRecord;
pub use category::{CategoryConfig, CategoryKey, ParseCategoryError};
pub use level::{LevelTier, ParseLevelError, SelfLevel};
pub use question::{Difficulty, DifficultyError, OPTION_COUNT, Question};
pub use session::{Phase, SessionState, SubmissionStatus};
