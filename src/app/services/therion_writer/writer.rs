//! Therion centreline serialization
//!
//! Renders a [`Cave`] as one Therion `.th` document: an encoding line, the
//! equates between surveys, then one `survey` block per survey with its
//! centreline data and passage dimensions.

use regex::Regex;
use std::collections::BTreeSet;
use std::fmt::Write;
use tracing::{debug, info, warn};

use super::renaming::{rename_identifiers, RenameSummary};
use crate::app::models::{Cave, FormatCode, Survey, SurveyDate};
use crate::app::services::unit_conversion::{format_fixed, format_optional};
use crate::constants::CENTURY_PIVOT;
use crate::Result;

const COMMENT: &str = "# ";

/// Characters Therion does not accept in survey and station names
const UNSAFE_NAME_PATTERN: &str = "[^A-Za-z0-9_]";

/// Writer for Therion centreline files
#[derive(Debug, Clone)]
pub struct TherionWriter {
    rename_identifiers: bool,
    unsafe_name: Regex,
}

impl TherionWriter {
    /// Create a writer, optionally renaming unsafe identifiers
    pub fn new(rename_identifiers: bool) -> Result<Self> {
        Ok(Self {
            rename_identifiers,
            unsafe_name: Regex::new(UNSAFE_NAME_PATTERN)?,
        })
    }

    /// Serialize the cave, declaring `charset_label` as the file encoding
    ///
    /// Renaming works on a copy; the caller's cave is left untouched.
    pub fn serialize(&self, charset_label: &str, cave: &Cave) -> Result<String> {
        Ok(self.serialize_with_summary(charset_label, cave)?.0)
    }

    /// Serialize and report how many identifiers were renamed
    pub fn serialize_with_summary(
        &self,
        charset_label: &str,
        cave: &Cave,
    ) -> Result<(String, RenameSummary)> {
        let mut summary = RenameSummary::default();
        let renamed;
        let cave = if self.rename_identifiers {
            let mut copy = cave.clone();
            summary = rename_identifiers(&mut copy, &self.unsafe_name);
            info!(
                "Renamed {} surveys and {} stations",
                summary.surveys, summary.stations
            );
            renamed = copy;
            &renamed
        } else {
            cave
        };

        self.warn_unsafe_names(cave);

        let mut out = String::new();
        writeln!(out, "encoding {}", charset_label)?;
        writeln!(out)?;
        writeln!(out, "{}{}", COMMENT, cave.name())?;

        for connection in cave.connections() {
            writeln!(
                out,
                "equate {}@{} {}@{}",
                connection.from_station,
                connection.from_survey,
                connection.to_station,
                connection.to_survey
            )?;
        }
        writeln!(out)?;
        writeln!(out)?;

        for survey in cave.surveys() {
            debug!("Writing survey {}", survey.name);
            write_survey(&mut out, survey)?;
        }

        writeln!(out)?;
        writeln!(out)?;

        Ok((out, summary))
    }

    /// Warn once per survey or station name Therion may reject
    fn warn_unsafe_names(&self, cave: &Cave) {
        for survey in cave.surveys() {
            if self.unsafe_name.is_match(&survey.name) {
                warn!(
                    "Survey name {} contains non-alphanumeric characters. This may cause problems in Therion.",
                    survey.name
                );
            }
        }

        let stations: BTreeSet<&str> = cave
            .surveys()
            .iter()
            .flat_map(|s| s.station_names())
            .filter(|name| self.unsafe_name.is_match(name))
            .collect();
        for station in stations {
            warn!(
                "Station name {} contains non-alphanumeric characters. This may cause problems in Therion.",
                station
            );
        }
    }
}

fn write_survey(out: &mut String, survey: &Survey) -> Result<()> {
    let comment = survey.comment.as_deref().unwrap_or_default();
    let format = &survey.format;

    writeln!(out, "survey {} -title \"{}\"", survey.name, comment)?;
    writeln!(out, "{}{}", COMMENT, survey.cave_name)?;
    writeln!(out, "{}{}", COMMENT, comment)?;
    writeln!(out, "centreline")?;

    if let Some(date) = survey.date.as_ref().and_then(format_date) {
        writeln!(out, "date {}", date)?;
    }

    for caver in survey.cavers.iter().filter(|c| !c.is_empty()) {
        writeln!(out, "team \"{}\"", caver)?;
    }

    writeln!(out, "units length {}", format.length_unit.text())?;
    writeln!(out, "units compass {}", format.azimuth_unit.text())?;
    writeln!(out, "units clino {}", format.inclination_unit.text())?;
    if let Some(declination) = survey.declination {
        writeln!(out, "declination {} degrees", format_fixed(declination))?;
    }
    writeln!(out)?;

    write!(out, "data normal from to ")?;
    for item in format.shot_item_order.values() {
        if item.is_reverse() && !format.has_backsights {
            continue;
        }
        write!(out, "{} ", item.text())?;
    }
    writeln!(out)?;

    for shot in survey.shots() {
        write!(out, "{} {} ", shot.from, shot.to)?;
        for item in format.shot_item_order.values() {
            write!(out, "{} ", format_optional(shot.value(*item)))?;
        }
        if let Some(comment) = &shot.comment {
            write!(out, "{}{}", COMMENT, comment)?;
        }
        writeln!(out)?;
    }
    writeln!(out)?;

    write!(out, "data dimensions station ")?;
    for dimension in format.dimension_order.values() {
        write!(out, "{} ", dimension.text())?;
    }
    writeln!(out)?;

    for shot in survey.shots() {
        write!(out, "{} ", shot.dimension_station(format.dimension_association))?;
        for dimension in format.dimension_order.values() {
            write!(out, "{} ", format_optional(shot.dimension(*dimension)))?;
        }
        writeln!(out)?;
    }
    writeln!(out)?;

    writeln!(out, "endcentreline")?;
    writeln!(out, "endsurvey")?;
    writeln!(out)?;
    writeln!(out)?;

    Ok(())
}

/// Text of the Therion `date` directive, or `None` when nothing is written
///
/// Two-digit years up to 50 are taken as 20xx, other two-digit years as
/// 19xx. The day is only written together with a month.
pub fn format_date(date: &SurveyDate) -> Option<String> {
    if date.year == 0 {
        return None;
    }

    let year = match date.year {
        y @ 0..=CENTURY_PIVOT => y + 2000,
        y if y < 100 && y > CENTURY_PIVOT => y + 1900,
        y => y,
    };
    if year != date.year {
        info!("Two digits year {} converted to {}", date.year, year);
    }

    let mut text = year.to_string();
    if date.month != 0 {
        text.push_str(&format!(".{}", date.month));
        if date.day != 0 {
            text.push_str(&format!(".{}", date.day));
        }
    }
    Some(text)
}
