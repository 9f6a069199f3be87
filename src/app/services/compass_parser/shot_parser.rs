//! Individual shot record processing
//!
//! Handles conversion of one whitespace-delimited data line into a [`Shot`],
//! including passage dimension sentinels, backsight reconstruction and unit
//! conversion into the survey's declared units.

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::field_parsers::parse_decimal;
use super::stats::ParseStats;
use crate::app::models::{AzimuthUnit, InclinationUnit, LengthUnit, Shot, SurveyFormat};
use crate::app::services::unit_conversion::{
    decimal_feet_to_metres, degree_to_gradians, degree_to_percent, round_half_up,
};
use crate::constants::{
    FLAGS_PREFIX, MIN_SHOT_FIELDS, MISSING_READING, MISSING_READING_SCALE, OPEN_PASSAGE_MARKER,
};
use crate::{Error, Result};

/// Token index of the first passage dimension
const FIRST_DIMENSION: usize = 5;

/// Token index of the reverse azimuth when backsights are recorded
const REVERSE_AZIMUTH: usize = 9;

/// Parse one shot record
pub fn parse_shot_record(
    line: &str,
    format: &SurveyFormat,
    stats: &mut ParseStats,
) -> Result<Shot> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_SHOT_FIELDS {
        return Err(Error::IncompleteShot {
            expected: MIN_SHOT_FIELDS,
            found: tokens.len(),
        });
    }

    let length = parse_length(tokens[2], "length", format.length_unit)?;
    let azimuth = parse_decimal(tokens[3], "azimuth")?;
    let inclination = parse_decimal(tokens[4], "inclination")?;

    let mut shot = Shot::new(tokens[0], tokens[1], length, azimuth, inclination);

    for (&position, &dimension) in &format.dimension_order {
        let index = FIRST_DIMENSION + usize::from(position) - 1;
        let Some(token) = tokens.get(index) else {
            continue;
        };

        let value = if token.contains(OPEN_PASSAGE_MARKER) {
            info!(
                "Dimension '{}' of shot {} - {} replaced by 0",
                token, shot.from, shot.to
            );
            stats.zeroed_dimensions += 1;
            Decimal::ZERO
        } else {
            parse_length(token, dimension_field(position), format.dimension_unit)?
        };
        shot.set_dimension(dimension, value);
    }

    let mut trailing = REVERSE_AZIMUTH;
    if format.has_backsights {
        let reverse_azimuth = tokens
            .get(REVERSE_AZIMUTH)
            .map(|t| parse_decimal(t, "reverse azimuth"))
            .transpose()?;
        let reverse_inclination = tokens
            .get(REVERSE_AZIMUTH + 1)
            .map(|t| parse_decimal(t, "reverse inclination"))
            .transpose()?;
        shot.reverse_azimuth = reverse_azimuth;
        shot.reverse_inclination = reverse_inclination;
        trailing += 2;

        reconcile_backsights(&mut shot, stats)?;
    }

    convert_angles(&mut shot, format)?;
    shot.comment = parse_comment(tokens.get(trailing..).unwrap_or_default());

    debug!("Parsed shot {} - {}", shot.from, shot.to);
    Ok(shot)
}

/// Parse a length token stored in decimal feet, converting to the declared unit
fn parse_length(token: &str, field: &'static str, unit: LengthUnit) -> Result<Decimal> {
    let feet = parse_decimal(token, field)?;
    match unit {
        LengthUnit::Metres => decimal_feet_to_metres(feet),
        _ => Ok(round_half_up(feet)),
    }
}

fn dimension_field(position: u8) -> &'static str {
    match position {
        1 => "first dimension",
        2 => "second dimension",
        3 => "third dimension",
        _ => "fourth dimension",
    }
}

/// Sentinel check at two decimals, so `-999` and `-999.004` both match
fn is_missing(value: Decimal) -> bool {
    round_half_up(value) == Decimal::new(MISSING_READING, MISSING_READING_SCALE)
}

/// Reverse bearing of an azimuth in degrees
fn flip_azimuth(azimuth: Decimal) -> Result<Decimal> {
    let half_turn = Decimal::from(180);
    let flipped = if round_half_up(azimuth) > half_turn {
        azimuth.checked_sub(half_turn)
    } else {
        azimuth.checked_add(half_turn)
    };
    flipped.ok_or_else(|| Error::conversion(azimuth, "reverse azimuth"))
}

/// Reconstruct a missing foresight or backsight from its partner
pub fn reconcile_backsights(shot: &mut Shot, stats: &mut ParseStats) -> Result<()> {
    if let Some(reverse) = shot.reverse_azimuth {
        if is_missing(shot.azimuth) && !is_missing(reverse) {
            shot.azimuth = flip_azimuth(reverse)?;
            info!(
                "Azimuth of shot {} - {} reconstructed from backsight: {}",
                shot.from, shot.to, shot.azimuth
            );
            stats.flipped_readings += 1;
        } else if is_missing(reverse) && !is_missing(shot.azimuth) {
            let flipped = flip_azimuth(shot.azimuth)?;
            info!(
                "Backsight azimuth of shot {} - {} reconstructed from foresight: {}",
                shot.from, shot.to, flipped
            );
            shot.reverse_azimuth = Some(flipped);
            stats.flipped_readings += 1;
        }
    }

    if let Some(reverse) = shot.reverse_inclination {
        if is_missing(shot.inclination) && !is_missing(reverse) {
            shot.inclination = -reverse;
            info!(
                "Inclination of shot {} - {} reconstructed from backsight: {}",
                shot.from, shot.to, shot.inclination
            );
            stats.flipped_readings += 1;
        } else if is_missing(reverse) && !is_missing(shot.inclination) {
            let flipped = -shot.inclination;
            info!(
                "Backsight inclination of shot {} - {} reconstructed from foresight: {}",
                shot.from, shot.to, flipped
            );
            shot.reverse_inclination = Some(flipped);
            stats.flipped_readings += 1;
        }
    }

    Ok(())
}

/// Convert degree readings into the survey's azimuth and inclination units
///
/// Every angle leaves here rounded to two decimals.
fn convert_angles(shot: &mut Shot, format: &SurveyFormat) -> Result<()> {
    let azimuth: fn(Decimal) -> Result<Decimal> = match format.azimuth_unit {
        AzimuthUnit::Grads => degree_to_gradians,
        _ => |degrees| Ok(round_half_up(degrees)),
    };
    let inclination: fn(Decimal) -> Result<Decimal> = match format.inclination_unit {
        InclinationUnit::Grads => degree_to_gradians,
        InclinationUnit::Percent => degree_to_percent,
        _ => |degrees| Ok(round_half_up(degrees)),
    };

    shot.azimuth = azimuth(shot.azimuth)?;
    shot.reverse_azimuth = shot.reverse_azimuth.map(azimuth).transpose()?;
    shot.inclination = inclination(shot.inclination)?;
    shot.reverse_inclination = shot.reverse_inclination.map(inclination).transpose()?;

    Ok(())
}

/// Comment from the tokens after the readings; a leading flags token is dropped
fn parse_comment(tokens: &[&str]) -> Option<String> {
    let tokens = match tokens.first() {
        Some(first) if first.starts_with(FLAGS_PREFIX) => &tokens[1..],
        _ => tokens,
    };

    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}
