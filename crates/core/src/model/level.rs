use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::question::Difficulty;

//
// ─── SELF-REPORTED LEVEL ──────────────────────────────────────────────────────
//

/// How the user describes their own familiarity before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfLevel {
    Starter,
    Learning,
    Familiar,
    Pro,
}

impl SelfLevel {
    pub const ALL: [Self; 4] = [Self::Starter, Self::Learning, Self::Familiar, Self::Pro];

    /// Desired difficulty every category starts from at this level.
    #[must_use]
    pub const fn starting_difficulty(self) -> Difficulty {
        match self {
            Self::Starter => Difficulty::EASY,
            Self::Learning | Self::Familiar => Difficulty::MEDIUM,
            Self::Pro => Difficulty::HARD,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Learning => "learning",
            Self::Familiar => "familiar",
            Self::Pro => "pro",
        }
    }
}

impl fmt::Display for SelfLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown level {:?} (expected starter, learning, familiar or pro)",
            self.0
        )
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for SelfLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == wanted)
            .ok_or_else(|| ParseLevelError(s.to_owned()))
    }
}

//
// ─── RESULT TIER ──────────────────────────────────────────────────────────────
//

/// Qualitative label derived from the composite score.
///
/// Bands are inclusive-lower / exclusive-upper: `<20`, `<40`, `<65`, `<85`, rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelTier {
    Foundational,
    Developing,
    Competent,
    Proficient,
    Advanced,
}

impl LevelTier {
    /// Upper bounds (exclusive) of every band except the top one.
    pub const BREAKPOINTS: [u8; 4] = [20, 40, 65, 85];

    #[must_use]
    pub fn from_score(score: u8) -> Self {
        let [foundational, developing, competent, proficient] = Self::BREAKPOINTS;
        if score < foundational {
            Self::Foundational
        } else if score < developing {
            Self::Developing
        } else if score < competent {
            Self::Competent
        } else if score < proficient {
            Self::Proficient
        } else {
            Self::Advanced
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Foundational => "Foundational",
            Self::Developing => "Developing",
            Self::Competent => "Competent",
            Self::Proficient => "Proficient",
            Self::Advanced => "Advanced",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Foundational => "You are at the start of the journey. The basics will pay off fast.",
            Self::Developing => "You know some core ideas; a few habits will make them stick.",
            Self::Competent => "You handle everyday money decisions with reasonable confidence.",
            Self::Proficient => "You have a solid grasp of most topics and only a few gaps left.",
            Self::Advanced => "You understand the material deeply and can plan for the long term.",
        }
    }
}
