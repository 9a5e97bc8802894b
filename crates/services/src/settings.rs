use serde::{Deserialize, Serialize};

pub const DEFAULT_TOOL_ID: &str = "financial-literacy-quiz";
pub const DEFAULT_SESSION_KEY: &str = "finquiz:session";

/// Identity of this tool towards the result store, plus where the session snapshot lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentSettings {
    pub tool_id: String,
    pub version: u32,
    pub session_key: String,
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            tool_id: DEFAULT_TOOL_ID.to_owned(),
            version: 1,
            session_key: DEFAULT_SESSION_KEY.to_owned(),
        }
    }
}

impl AssessmentSettings {
    #[must_use]
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }
}
