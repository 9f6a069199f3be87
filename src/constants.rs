//! Application constants for the cave translator
//!
//! This module contains the labels, markers, sentinels and default values
//! of the Compass survey format, plus defaults used by the CLI.

// =============================================================================
// Section Markers
// =============================================================================

/// Form feed line closing a survey section
pub const SECTION_BREAK: char = '\u{000C}';

/// SUB character Compass writes as the last line of a file
pub const END_OF_FILE: char = '\u{001A}';

/// Number of header lines in a section before shot records begin
pub const HEADER_LINES: usize = 9;

// =============================================================================
// Header Labels
// =============================================================================

pub const SURVEY_NAME_LABEL: &str = "SURVEY NAME:";
pub const SURVEY_DATE_LABEL: &str = "SURVEY DATE:";

/// Optional in Compass
pub const COMMENT_LABEL: &str = "COMMENT:";

pub const DECLINATION_LABEL: &str = "DECLINATION:";

/// Optional in Compass
pub const FORMAT_LABEL: &str = "FORMAT:";

/// Optional in Compass, not interpreted
pub const CORRECTIONS_LABEL: &str = "CORRECTIONS:";

/// Declination value Compass writes when none was measured
pub const UNSET_DECLINATION: &str = "0.00";

// =============================================================================
// FORMAT Code String
// =============================================================================

/// Accepted lengths of the FORMAT code string
pub const FORMAT_LENGTHS: &[usize] = &[11, 12, 13, 15];

/// Backsight flag value in the FORMAT string
pub const BACKSIGHT_FLAG: char = 'B';

// =============================================================================
// Shot Records
// =============================================================================

/// From, to, length, azimuth, inclination
pub const MIN_SHOT_FIELDS: usize = 5;

/// Prefix of the Compass shot flags token
pub const FLAGS_PREFIX: &str = "#|";

/// Marker inside a passage dimension token meaning "open passage"
pub const OPEN_PASSAGE_MARKER: char = '-';

/// Value Compass stores for a missing foresight or backsight reading
pub const MISSING_READING: i64 = -99900;

/// Scale of `MISSING_READING` (-999.00)
pub const MISSING_READING_SCALE: u32 = 2;

// =============================================================================
// Numeric Precision
// =============================================================================

/// Fractional digits of every stored and written value
pub const DECIMAL_PLACES: u32 = 2;

/// Metres per foot
pub const METRES_PER_FOOT: i64 = 3048;
pub const METRES_PER_FOOT_SCALE: u32 = 4;

/// Two-digit years up to this value belong to the 21st century
pub const CENTURY_PIVOT: i32 = 50;

// =============================================================================
// CLI Defaults
// =============================================================================

/// Compass is a Windows program
pub const DEFAULT_INPUT_CHARSET: &str = "windows-1252";

pub const DEFAULT_OUTPUT_CHARSET: &str = "UTF-8";

/// Extension of generated Therion files
pub const OUTPUT_EXTENSION: &str = "th";
