//! Section cursor for the positional Compass grammar
//!
//! The meaning of a line depends only on its position inside the current
//! survey section. [`SectionState`] names those positions and is advanced once
//! per line; a form feed resets it to [`SectionState::CaveName`].

use crate::constants::HEADER_LINES;

/// Role of the next line within a survey section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    /// Line 1: cave name label
    CaveName,
    /// Line 2: `SURVEY NAME:`
    SurveyName,
    /// Line 3: `SURVEY DATE:` and optional `COMMENT:`
    DateAndComment,
    /// Line 4
    Unused,
    /// Line 5: comma-separated cavers
    Team,
    /// Line 6: `DECLINATION:`, `FORMAT:`, `CORRECTIONS:`
    Format,
    /// Lines 7 to 9, carrying the 1-based section line of the next line
    Preamble(usize),
    /// Line 10 onwards: shot records
    Data,
}

impl SectionState {
    /// Start of a fresh section
    pub fn start() -> Self {
        Self::CaveName
    }

    /// State for the line following this one
    pub fn advance(self) -> Self {
        match self {
            Self::CaveName => Self::SurveyName,
            Self::SurveyName => Self::DateAndComment,
            Self::DateAndComment => Self::Unused,
            Self::Unused => Self::Team,
            Self::Team => Self::Format,
            Self::Format => Self::Preamble(7),
            Self::Preamble(line) if line < HEADER_LINES => Self::Preamble(line + 1),
            Self::Preamble(_) | Self::Data => Self::Data,
        }
    }

    /// Whether the section has reached its shot records
    pub fn in_data(self) -> bool {
        self == Self::Data
    }

    /// Whether the section holds any header content yet
    pub fn has_content(self) -> bool {
        self != Self::CaveName
    }
}

impl Default for SectionState {
    fn default() -> Self {
        Self::start()
    }
}
