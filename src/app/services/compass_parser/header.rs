//! Survey section header extraction
//!
//! Lines 1 to 6 of every section carry survey metadata in labelled fields.
//! Each function here decodes one of those lines into the open [`Survey`].

use rust_decimal::Decimal;
use tracing::debug;

use super::field_parsers::{labeled_field, parse_date_component, parse_decimal};
use super::format_code::decode_format;
use super::stats::ParseStats;
use crate::app::models::{Survey, SurveyDate, SurveyFormat};
use crate::constants::{
    COMMENT_LABEL, CORRECTIONS_LABEL, DECLINATION_LABEL, FORMAT_LABEL, SURVEY_DATE_LABEL,
    SURVEY_NAME_LABEL, UNSET_DECLINATION,
};
use crate::{Error, Result};

/// Line 1: cave name label
pub fn parse_cave_name(survey: &mut Survey, line: &str) {
    survey.cave_name = line.trim().to_string();
}

/// Line 2: survey name
pub fn parse_survey_name(survey: &mut Survey, line: &str) {
    // a missing label leaves the whole line as the name
    let name = labeled_field(line, SURVEY_NAME_LABEL, &[]).unwrap_or_else(|| line.trim());
    survey.name = name.to_string();
}

/// Line 3: survey date and optional comment
pub fn parse_date_and_comment(survey: &mut Survey, line: &str) -> Result<()> {
    if let Some(comment) = labeled_field(line, COMMENT_LABEL, &[]) {
        if !comment.is_empty() {
            survey.comment = Some(comment.to_string());
        }
    }

    let date = labeled_field(line, SURVEY_DATE_LABEL, &[COMMENT_LABEL]).unwrap_or_default();
    survey.date = parse_survey_date(date)?;
    Ok(())
}

/// Decode `month day year` with whitespace collapsed
///
/// Fewer tokens drop components from the front: two tokens are
/// `month year`, one token is the year alone. Missing parts are zero and the
/// year is kept exactly as written.
pub fn parse_survey_date(raw: &str) -> Result<Option<SurveyDate>> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();

    let numbers = tokens
        .iter()
        .map(|token| parse_date_component(token, raw))
        .collect::<Result<Vec<i64>>>()?;

    let (month, day, year) = match numbers.as_slice() {
        [] => return Ok(None),
        [year] => (0, 0, *year),
        [month, year] => (*month, 0, *year),
        [month, day, year] => (*month, *day, *year),
        _ => {
            return Err(Error::invalid_date(
                raw,
                format!("expected at most 3 components, found {}", numbers.len()),
            ));
        }
    };

    let component = |value: i64, what: &str| {
        u32::try_from(value)
            .map_err(|_| Error::invalid_date(raw, format!("{} must not be negative", what)))
    };
    let year = i32::try_from(year)
        .map_err(|_| Error::invalid_date(raw, "year out of range".to_string()))?;

    Ok(Some(SurveyDate::new(
        year,
        component(month, "month")?,
        component(day, "day")?,
    )))
}

/// Line 5: comma-separated survey team
pub fn parse_cavers(survey: &mut Survey, line: &str) {
    for caver in line.split(',') {
        survey.add_caver(caver.trim());
    }
}

/// Line 6: declination and FORMAT code string; corrections are ignored
pub fn parse_declination_and_format(
    survey: &mut Survey,
    line: &str,
    stats: &mut ParseStats,
) -> Result<()> {
    let declination = labeled_field(line, DECLINATION_LABEL, &[FORMAT_LABEL, CORRECTIONS_LABEL])
        .unwrap_or_default();
    survey.declination = parse_declination(declination)?;

    survey.format = match labeled_field(line, FORMAT_LABEL, &[CORRECTIONS_LABEL]) {
        Some(code) => decode_format(code, stats)?,
        None => {
            debug!("Survey {} has no FORMAT, using defaults", survey.name);
            SurveyFormat::default()
        }
    };

    Ok(())
}

/// Blank or `0.00` means no declination was measured
fn parse_declination(value: &str) -> Result<Option<Decimal>> {
    if value.is_empty() || value == UNSET_DECLINATION {
        return Ok(None);
    }
    parse_decimal(value, "declination").map(Some)
}
