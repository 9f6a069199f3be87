//! Core Compass parser implementation
//!
//! This module drives the section state machine over the decoded input,
//! dispatching each line to the header and shot parsers and collecting
//! finished surveys into the [`Cave`].

use std::mem;
use tracing::{debug, info, warn};

use super::field_parsers::is_marker;
use super::header::{
    parse_cave_name, parse_cavers, parse_date_and_comment, parse_declination_and_format,
    parse_survey_name,
};
use super::shot_parser::parse_shot_record;
use super::state::SectionState;
use super::stats::{ParseResult, ParseStats};
use crate::app::models::{Cave, Survey};
use crate::config::Charset;
use crate::constants::{END_OF_FILE, SECTION_BREAK};
use crate::{Error, Result};

/// Parser for Compass `.dat` survey files
///
/// Decoding is strict: the first malformed line aborts the parse with an
/// error carrying its 1-based line number. Recoverable oddities (unsupported
/// units, missing readings, open passage dimensions) are logged and counted.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompassParser;

impl CompassParser {
    pub fn new() -> Self {
        Self
    }

    /// Decode raw bytes in the declared charset and parse them
    pub fn parse(&self, cave_name: &str, input: &[u8], charset: Charset) -> Result<ParseResult> {
        debug!("Decoding {} bytes as {}", input.len(), charset);
        let text = charset.decode(input)?;
        self.parse_str(cave_name, &text)
    }

    /// Parse already decoded survey text
    pub fn parse_str(&self, cave_name: &str, text: &str) -> Result<ParseResult> {
        info!("Parsing Compass survey data for cave: {}", cave_name);

        let mut cave = Cave::new(cave_name);
        let mut stats = ParseStats::new();
        let mut survey = Survey::default();
        let mut state = SectionState::start();

        for (index, line) in text.lines().enumerate() {
            if is_marker(line, SECTION_BREAK) {
                // consecutive form feeds carry no section
                if state.has_content() {
                    Self::close_section(&mut cave, mem::take(&mut survey), &mut stats);
                }
                state = SectionState::start();
                continue;
            }

            if is_marker(line, END_OF_FILE) {
                continue;
            }

            Self::parse_line(state, line, &mut survey, &mut stats)
                .map_err(|e| Error::at_line(index + 1, e))?;
            state = state.advance();
        }

        if state.in_data() {
            warn!(
                "Survey {} is not terminated by a form feed, discarding it",
                survey.name
            );
            stats.unterminated = true;
        } else if state.has_content() && !survey.name.is_empty() {
            warn!(
                "Input ends inside the header of survey {}, discarding it",
                survey.name
            );
            stats.unterminated = true;
        }

        info!("Parsed {} surveys with {} shots", stats.surveys, stats.shots);

        Ok(ParseResult { cave, stats })
    }

    /// Dispatch one line according to its position in the section
    fn parse_line(
        state: SectionState,
        line: &str,
        survey: &mut Survey,
        stats: &mut ParseStats,
    ) -> Result<()> {
        match state {
            SectionState::CaveName => parse_cave_name(survey, line),
            SectionState::SurveyName => parse_survey_name(survey, line),
            SectionState::DateAndComment => parse_date_and_comment(survey, line)?,
            SectionState::Team => parse_cavers(survey, line),
            SectionState::Format => parse_declination_and_format(survey, line, stats)?,
            SectionState::Unused | SectionState::Preamble(_) => {}
            SectionState::Data => {
                if line.trim().is_empty() {
                    return Ok(());
                }

                let shot = parse_shot_record(line, &survey.format, stats)?;
                if !survey.add_shot(shot) {
                    info!(
                        "Duplicate shot in survey {} ignored: {}",
                        survey.name,
                        line.trim()
                    );
                    stats.duplicate_shots += 1;
                }
            }
        }
        Ok(())
    }

    /// Hand a finished survey to the cave
    fn close_section(cave: &mut Cave, survey: Survey, stats: &mut ParseStats) {
        stats.sections += 1;
        let name = survey.name.clone();
        let shots = survey.shots().len();

        if cave.add_survey(survey) {
            debug!("Survey {} closed with {} shots", name, shots);
            stats.surveys += 1;
            stats.shots += shots;
        } else {
            warn!("Duplicate survey {} ignored", name);
            stats.duplicate_surveys += 1;
        }
    }
}
