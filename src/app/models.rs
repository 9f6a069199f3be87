//! Data models for cave survey translation
//!
//! This module contains the normalized survey model shared by the parser,
//! the connection resolver and the Therion writer: a [`Cave`] owning ordered
//! [`Survey`] sections, each holding its [`Shot`]s, plus the [`Connection`]s
//! inferred between sections.

pub mod codes;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use codes::{
    AzimuthUnit, Dimension, DimensionAssociation, FormatCode, InclinationUnit, LengthUnit,
    ShotItem,
};

// =============================================================================
// Cave
// =============================================================================

/// Root aggregate of one translation run
///
/// Surveys keep insertion order, which is also the order they are written in.
/// Connections are deduplicated by structural equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cave {
    name: String,
    surveys: Vec<Survey>,
    connections: Vec<Connection>,
}

impl Cave {
    /// Create an empty cave
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surveys: Vec::new(),
            connections: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surveys(&self) -> &[Survey] {
        &self.surveys
    }

    pub fn surveys_mut(&mut self) -> &mut [Survey] {
        &mut self.surveys
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connections_mut(&mut self) -> &mut [Connection] {
        &mut self.connections
    }

    /// Append a survey; returns false if one with the same name already exists
    pub fn add_survey(&mut self, survey: Survey) -> bool {
        if self.surveys.contains(&survey) {
            return false;
        }
        self.surveys.push(survey);
        true
    }

    /// Add a connection; returns false if an equal connection is present
    pub fn add_connection(&mut self, connection: Connection) -> bool {
        if self.connections.contains(&connection) {
            return false;
        }
        self.connections.push(connection);
        true
    }

    /// Look up a survey by name
    pub fn survey(&self, name: &str) -> Option<&Survey> {
        self.surveys.iter().find(|s| s.name == name)
    }

    /// Total number of shots over all surveys
    pub fn shot_count(&self) -> usize {
        self.surveys.iter().map(|s| s.shots.len()).sum()
    }
}

// =============================================================================
// Survey
// =============================================================================

/// Survey date as recorded, without validation
///
/// Any component may be zero meaning "unspecified". Two-digit years are kept
/// as written; the century is resolved when the date is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurveyDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl SurveyDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

/// Units, column orders and backsight settings declared by a survey's FORMAT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyFormat {
    pub azimuth_unit: AzimuthUnit,
    pub length_unit: LengthUnit,
    pub dimension_unit: LengthUnit,
    pub inclination_unit: InclinationUnit,

    /// Position (1..=4) to passage dimension
    pub dimension_order: BTreeMap<u8, Dimension>,

    /// Position (1..=5) to shot item
    pub shot_item_order: BTreeMap<u8, ShotItem>,

    pub has_backsights: bool,
    pub dimension_association: DimensionAssociation,
}

impl Default for SurveyFormat {
    /// Configuration Compass implies when a survey has no FORMAT field
    fn default() -> Self {
        Self {
            azimuth_unit: AzimuthUnit::Degrees,
            length_unit: LengthUnit::DecimalFeet,
            dimension_unit: LengthUnit::DecimalFeet,
            inclination_unit: InclinationUnit::Degrees,
            dimension_order: BTreeMap::from([
                (1, Dimension::Left),
                (2, Dimension::Up),
                (3, Dimension::Down),
                (4, Dimension::Right),
            ]),
            shot_item_order: BTreeMap::from([
                (1, ShotItem::Length),
                (2, ShotItem::Azimuth),
                (3, ShotItem::Inclination),
            ]),
            has_backsights: false,
            dimension_association: DimensionAssociation::From,
        }
    }
}

/// One recorded survey section
///
/// Equality is by name only. Shots are unique by their from/to pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Survey {
    pub name: String,

    /// Cave name label from the section header, not checked against the cave
    pub cave_name: String,

    pub comment: Option<String>,
    pub date: Option<SurveyDate>,

    /// Always degrees in Compass
    pub declination: Option<Decimal>,

    pub format: SurveyFormat,
    pub cavers: Vec<String>,
    shots: Vec<Shot>,
}

impl PartialEq for Survey {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Survey {}

impl Survey {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn shots_mut(&mut self) -> &mut [Shot] {
        &mut self.shots
    }

    /// Append a shot; returns false if the from/to pair is already present
    pub fn add_shot(&mut self, shot: Shot) -> bool {
        if self.shots.contains(&shot) {
            return false;
        }
        self.shots.push(shot);
        true
    }

    pub fn add_caver(&mut self, caver: impl Into<String>) {
        self.cavers.push(caver.into());
    }

    /// Distinct station names appearing on either end of any shot
    pub fn station_names(&self) -> std::collections::BTreeSet<&str> {
        self.shots
            .iter()
            .flat_map(|shot| [shot.from.as_str(), shot.to.as_str()])
            .collect()
    }
}

// =============================================================================
// Shot
// =============================================================================

/// One directional measurement between two stations
///
/// Equality only compares the station pair; two shots between the same
/// stations are treated as the same shot regardless of their readings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    pub from: String,
    pub to: String,
    pub length: Decimal,
    pub azimuth: Decimal,
    pub inclination: Decimal,
    pub reverse_azimuth: Option<Decimal>,
    pub reverse_inclination: Option<Decimal>,
    pub left: Option<Decimal>,
    pub right: Option<Decimal>,
    pub up: Option<Decimal>,
    pub down: Option<Decimal>,
    pub comment: Option<String>,
}

impl PartialEq for Shot {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Shot {}

impl Shot {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        length: Decimal,
        azimuth: Decimal,
        inclination: Decimal,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            length,
            azimuth,
            inclination,
            reverse_azimuth: None,
            reverse_inclination: None,
            left: None,
            right: None,
            up: None,
            down: None,
            comment: None,
        }
    }

    /// Reading for a shot item
    pub fn value(&self, item: ShotItem) -> Option<Decimal> {
        match item {
            ShotItem::Length => Some(self.length),
            ShotItem::Azimuth => Some(self.azimuth),
            ShotItem::Inclination => Some(self.inclination),
            ShotItem::ReverseAzimuth => self.reverse_azimuth,
            ShotItem::ReverseInclination => self.reverse_inclination,
        }
    }

    /// Passage dimension reading
    pub fn dimension(&self, dimension: Dimension) -> Option<Decimal> {
        match dimension {
            Dimension::Left => self.left,
            Dimension::Right => self.right,
            Dimension::Up => self.up,
            Dimension::Down => self.down,
        }
    }

    pub fn set_dimension(&mut self, dimension: Dimension, value: Decimal) {
        let slot = match dimension {
            Dimension::Left => &mut self.left,
            Dimension::Right => &mut self.right,
            Dimension::Up => &mut self.up,
            Dimension::Down => &mut self.down,
        };
        *slot = Some(value);
    }

    /// Station the passage dimensions belong to
    pub fn dimension_station(&self, association: DimensionAssociation) -> &str {
        match association {
            DimensionAssociation::From => &self.from,
            DimensionAssociation::To => &self.to,
        }
    }
}

// =============================================================================
// Connection
// =============================================================================

/// Two stations in different surveys that are the same point in the cave
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Connection {
    pub from_station: String,
    pub from_survey: String,
    pub to_station: String,
    pub to_survey: String,
}

impl Connection {
    pub fn new(
        from_station: impl Into<String>,
        from_survey: impl Into<String>,
        to_station: impl Into<String>,
        to_survey: impl Into<String>,
    ) -> Self {
        Self {
            from_station: from_station.into(),
            from_survey: from_survey.into(),
            to_station: to_station.into(),
            to_survey: to_survey.into(),
        }
    }
}
