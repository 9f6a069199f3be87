//! Single-character codes of the Compass FORMAT string
//!
//! Every category is a closed enumeration carrying its Compass code and the
//! keyword Therion uses for it. Lookups are total: an unknown character is an
//! error naming the character, never a silent fallback.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A unit or item selector encoded as one character in the FORMAT string
pub trait FormatCode: Sized + Copy + 'static {
    /// Human-readable category used in error messages
    const CATEGORY: &'static str;

    /// All variants, in declaration order
    const ALL: &'static [Self];

    /// Compass code character
    fn code(self) -> char;

    /// Keyword written to the Therion file
    fn text(self) -> &'static str;

    /// Look up a variant by its Compass code
    fn from_code(code: char) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.code() == code)
            .ok_or_else(|| Error::unsupported_code(Self::CATEGORY, code))
    }
}

/// Bearing unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AzimuthUnit {
    Degrees,
    Grads,
    /// Quadrant bearings (Brunton compass), not representable downstream
    Quads,
}

impl FormatCode for AzimuthUnit {
    const CATEGORY: &'static str = "azimuth unit";
    const ALL: &'static [Self] = &[Self::Degrees, Self::Grads, Self::Quads];

    fn code(self) -> char {
        match self {
            Self::Degrees => 'D',
            Self::Grads => 'R',
            Self::Quads => 'Q',
        }
    }

    fn text(self) -> &'static str {
        match self {
            Self::Degrees => "degrees",
            Self::Grads => "grads",
            Self::Quads => "quads",
        }
    }
}

/// Unit of shot lengths and passage dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    Metres,
    DecimalFeet,
    FeetAndInches,
}

impl FormatCode for LengthUnit {
    const CATEGORY: &'static str = "length unit";
    const ALL: &'static [Self] = &[Self::Metres, Self::DecimalFeet, Self::FeetAndInches];

    fn code(self) -> char {
        match self {
            Self::Metres => 'M',
            Self::DecimalFeet => 'D',
            Self::FeetAndInches => 'I',
        }
    }

    fn text(self) -> &'static str {
        match self {
            Self::Metres => "metres",
            Self::DecimalFeet => "feet",
            Self::FeetAndInches => "inches",
        }
    }
}

/// Inclination unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InclinationUnit {
    Degrees,
    Grads,
    Percent,
    DegreesAndMinutes,
}

impl FormatCode for InclinationUnit {
    const CATEGORY: &'static str = "inclination unit";
    const ALL: &'static [Self] = &[
        Self::Degrees,
        Self::Grads,
        Self::Percent,
        Self::DegreesAndMinutes,
    ];

    fn code(self) -> char {
        match self {
            Self::Degrees => 'D',
            Self::Grads => 'R',
            Self::Percent => 'G',
            Self::DegreesAndMinutes => 'M',
        }
    }

    fn text(self) -> &'static str {
        match self {
            Self::Degrees => "degrees",
            Self::Grads => "grads",
            Self::Percent => "percent",
            Self::DegreesAndMinutes => "minutes",
        }
    }
}

/// Passage dimension (LRUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Left,
    Right,
    Up,
    Down,
}

impl FormatCode for Dimension {
    const CATEGORY: &'static str = "dimension";
    const ALL: &'static [Self] = &[Self::Left, Self::Right, Self::Up, Self::Down];

    fn code(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Right => 'R',
            Self::Up => 'U',
            Self::Down => 'D',
        }
    }

    fn text(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Measured quantity of a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotItem {
    Length,
    Azimuth,
    Inclination,
    ReverseAzimuth,
    ReverseInclination,
}

impl ShotItem {
    /// Backsight readings only exist when the survey records them
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::ReverseAzimuth | Self::ReverseInclination)
    }
}

impl FormatCode for ShotItem {
    const CATEGORY: &'static str = "shot item";
    const ALL: &'static [Self] = &[
        Self::Length,
        Self::Azimuth,
        Self::Inclination,
        Self::ReverseAzimuth,
        Self::ReverseInclination,
    ];

    fn code(self) -> char {
        match self {
            Self::Length => 'L',
            Self::Azimuth => 'A',
            Self::Inclination => 'D',
            Self::ReverseAzimuth => 'a',
            Self::ReverseInclination => 'd',
        }
    }

    fn text(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Azimuth => "compass",
            Self::Inclination => "clino",
            Self::ReverseAzimuth => "backcompass",
            Self::ReverseInclination => "backclino",
        }
    }
}

/// Station a shot's passage dimensions were measured at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DimensionAssociation {
    #[default]
    From,
    To,
}

impl FormatCode for DimensionAssociation {
    const CATEGORY: &'static str = "dimension association";
    const ALL: &'static [Self] = &[Self::From, Self::To];

    fn code(self) -> char {
        match self {
            Self::From => 'F',
            Self::To => 'T',
        }
    }

    fn text(self) -> &'static str {
        match self {
            Self::From => "from",
            Self::To => "to",
        }
    }
}
