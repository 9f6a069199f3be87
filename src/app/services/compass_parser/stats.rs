//! Parsing statistics and result structures for Compass processing
//!
//! Advisories raised while parsing are logged as they happen and counted
//! here so the CLI can summarize them.

use crate::app::models::Cave;

/// Parsing result with the cave and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed cave, without connections
    pub cave: Cave,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Survey sections encountered, including duplicates
    pub sections: usize,

    /// Surveys added to the cave
    pub surveys: usize,

    /// Sections dropped because their survey name was already taken
    pub duplicate_surveys: usize,

    /// Shots in the surveys added to the cave
    pub shots: usize,

    /// Shot records dropped because their from/to pair was already present
    pub duplicate_shots: usize,

    /// Unit codes replaced by a supported unit
    pub coerced_units: usize,

    /// Missing readings reconstructed from their backsight or foresight
    pub flipped_readings: usize,

    /// Open-passage dimension tokens replaced by zero
    pub zeroed_dimensions: usize,

    /// Whether the input ended inside a section, which was then discarded
    pub unterminated: bool,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Total advisories raised
    pub fn advisories(&self) -> usize {
        self.coerced_units + self.flipped_readings + self.zeroed_dimensions
    }
}
