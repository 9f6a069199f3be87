//! FORMAT code string decoding
//!
//! The FORMAT field of a section header packs units, column orders and the
//! backsight settings into 11, 12, 13 or 15 single-character codes. Units
//! Therion cannot express are replaced by the nearest supported unit and
//! reported as advisories.

use std::collections::BTreeMap;
use tracing::info;

use super::stats::ParseStats;
use crate::app::models::{
    AzimuthUnit, Dimension, DimensionAssociation, FormatCode, InclinationUnit, LengthUnit,
    ShotItem, SurveyFormat,
};
use crate::constants::{BACKSIGHT_FLAG, FORMAT_LENGTHS};
use crate::{Error, Result};

/// Decode a FORMAT code string
pub fn decode_format(code: &str, stats: &mut ParseStats) -> Result<SurveyFormat> {
    let chars: Vec<char> = code.chars().collect();
    if !FORMAT_LENGTHS.contains(&chars.len()) {
        return Err(Error::invalid_format_string(code));
    }

    let azimuth_unit = match AzimuthUnit::from_code(chars[0])? {
        AzimuthUnit::Quads => {
            info!("Quadrant bearings are not supported, using degrees");
            stats.coerced_units += 1;
            AzimuthUnit::Degrees
        }
        unit => unit,
    };
    let length_unit = decode_length_unit(chars[1], "length", stats)?;
    let dimension_unit = decode_length_unit(chars[2], "dimension", stats)?;
    let inclination_unit = match InclinationUnit::from_code(chars[3])? {
        InclinationUnit::DegreesAndMinutes => {
            info!("Degrees and minutes are not supported, using degrees");
            stats.coerced_units += 1;
            InclinationUnit::Degrees
        }
        unit => unit,
    };

    let mut dimension_order = BTreeMap::new();
    for (position, &c) in (1u8..).zip(&chars[4..8]) {
        dimension_order.insert(position, Dimension::from_code(c)?);
    }

    let mut shot_item_order = BTreeMap::new();
    for (position, &c) in (1u8..).zip(&chars[8..11]) {
        shot_item_order.insert(position, ShotItem::from_code(c)?);
    }

    let mut has_backsights = false;
    let mut dimension_association = DimensionAssociation::From;
    match chars.len() {
        12 => has_backsights = chars[11] == BACKSIGHT_FLAG,
        13 => {
            has_backsights = chars[11] == BACKSIGHT_FLAG;
            dimension_association = DimensionAssociation::from_code(chars[12])?;
        }
        15 => {
            shot_item_order.insert(4, ShotItem::from_code(chars[11])?);
            shot_item_order.insert(5, ShotItem::from_code(chars[12])?);
            has_backsights = chars[13] == BACKSIGHT_FLAG;
            dimension_association = DimensionAssociation::from_code(chars[14])?;
        }
        _ => {}
    }

    Ok(SurveyFormat {
        azimuth_unit,
        length_unit,
        dimension_unit,
        inclination_unit,
        dimension_order,
        shot_item_order,
        has_backsights,
        dimension_association,
    })
}

fn decode_length_unit(code: char, what: &str, stats: &mut ParseStats) -> Result<LengthUnit> {
    match LengthUnit::from_code(code)? {
        LengthUnit::FeetAndInches => {
            info!("Feet and inches are not supported for {}, using decimal feet", what);
            stats.coerced_units += 1;
            Ok(LengthUnit::DecimalFeet)
        }
        unit => Ok(unit),
    }
}
