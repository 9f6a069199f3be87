//! Test utilities for Compass parser testing
//!
//! This module provides builders for survey sections and complete `.dat`
//! documents used across the parser test modules.

use crate::app::models::SurveyFormat;
use crate::app::services::compass_parser::ParseStats;
pub use crate::constants::HEADER_LINES;

mod parser_tests;

/// 15-character FORMAT with backsights: up, down, left, right dimensions
pub const BACKSIGHT_FORMAT: &str = "DDDDUDLRLADadBF";


/// Build one survey section terminated by a form feed, using CRLF endings
pub fn create_test_section(name: &str, format: Option<&str>, shots: &[&str]) -> String {
    let declination = match format {
        Some(code) => format!(
            "DECLINATION:    1.00  FORMAT: {}  CORRECTIONS:  0.00 0.00 0.00",
            code
        ),
        None => "DECLINATION:    0.00  CORRECTIONS:  0.00 0.00 0.00".to_string(),
    };

    let mut lines = vec![
        "SECRET CAVE".to_string(),
        format!("SURVEY NAME: {}", name),
        format!("SURVEY DATE: 7 10 79  COMMENT:Survey {}", name),
        "SURVEY TEAM:".to_string(),
        "D. Smith, R. Brown ,S. Miller".to_string(),
        declination,
        String::new(),
        "        FROM           TO   LENGTH  BEARING      INC     LEFT       UP     DOWN    RIGHT   FLAGS  COMMENTS".to_string(),
        String::new(),
    ];
    lines.extend(shots.iter().map(|shot| shot.to_string()));
    lines.push("\u{000C}".to_string());

    lines.join("\r\n") + "\r\n"
}

/// Two sections sharing station A3, closed by the SUB end-of-file marker
pub fn create_test_dat() -> String {
    let first = create_test_section(
        "A",
        Some(BACKSIGHT_FORMAT),
        &[
            "A1 A2 12.50 135.00 -5.00 2.00 3.00 1.00 4.00 315.00 5.00",
            "A2 A3 8.20 -999.00 10.00 1.00 -9.90 0.50 2.00 170.00 -10.00 #|L# side passage",
            "A3 A4 20.00 90.00 0.00 1.00 1.00 1.00 1.00 270.00 0.00",
            "A4 A5 5.25 45.00 -999.00 0.00 0.00 0.00 0.00 225.00 12.00 mud slope",
        ],
    );
    let second = create_test_section(
        "B",
        Some(BACKSIGHT_FORMAT),
        &[
            "A3 B1 10.00 200.00 2.00 1.00 1.00 1.00 1.00 20.00 -2.00",
            "B1 B2 10.00 210.00 3.00 1.00 1.00 1.00 1.00 30.00 -3.00",
            "B2 B3 10.00 220.00 4.00 1.00 1.00 1.00 1.00 40.00 -4.00",
            "B3 B4 10.00 230.00 5.00 1.00 1.00 1.00 1.00 50.00 -5.00",
            "B4 A5 10.00 240.00 6.00 1.00 1.00 1.00 1.00 60.00 -6.00",
        ],
    );

    format!("{}{}\u{001A}\r\n", first, second)
}

/// Decode a FORMAT string with fresh statistics
pub fn decode(code: &str) -> crate::Result<(SurveyFormat, ParseStats)> {
    let mut stats = ParseStats::new();
    let format = crate::app::services::compass_parser::decode_format(code, &mut stats)?;
    Ok((format, stats))
}
