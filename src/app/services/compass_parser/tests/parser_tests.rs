//! Tests for section handling and error reporting

use super::*;
use crate::app::models::{DimensionAssociation, SurveyDate};
use crate::app::services::compass_parser::CompassParser;
use crate::config::Charset;
use crate::Error;
use rust_decimal::Decimal;

#[test]
fn test_parse_two_sections() {
    let result = CompassParser::new()
        .parse_str("Secret Cave", &create_test_dat())
        .unwrap();
    let cave = &result.cave;

    assert_eq!(cave.name(), "Secret Cave");
    assert_eq!(cave.surveys().len(), 2);
    assert_eq!(cave.surveys()[0].name, "A");
    assert_eq!(cave.surveys()[1].name, "B");
    assert_eq!(cave.surveys()[0].shots().len(), 4);
    assert_eq!(cave.surveys()[1].shots().len(), 5);
    assert_eq!(cave.shot_count(), 9);
    assert!(cave.connections().is_empty());

    assert_eq!(result.stats.sections, 2);
    assert_eq!(result.stats.surveys, 2);
    assert_eq!(result.stats.shots, 9);
    assert!(!result.stats.unterminated);
}

#[test]
fn test_header_fields() {
    let result = CompassParser::new()
        .parse_str("Secret Cave", &create_test_dat())
        .unwrap();
    let survey = &result.cave.surveys()[0];

    assert_eq!(survey.cave_name, "SECRET CAVE");
    assert_eq!(survey.comment.as_deref(), Some("Survey A"));
    assert_eq!(survey.date, Some(SurveyDate::new(79, 7, 10)));
    assert_eq!(survey.cavers, vec!["D. Smith", "R. Brown", "S. Miller"]);
    assert_eq!(survey.declination, Some(Decimal::new(100, 2)));
    assert!(survey.format.has_backsights);
    assert_eq!(
        survey.format.dimension_association,
        DimensionAssociation::From
    );
}

#[test]
fn test_section_without_format_uses_defaults() {
    let text = create_test_section("C", None, &["C1 C2 10.00 90.00 0.00 1.00 2.00 3.00 4.00"]);
    let result = CompassParser::new().parse_str("Cave", &text).unwrap();
    let survey = &result.cave.surveys()[0];

    assert_eq!(survey.declination, None);
    assert!(!survey.format.has_backsights);

    // default dimension order is left, up, down, right
    let shot = &survey.shots()[0];
    assert_eq!(shot.left, Some(Decimal::new(100, 2)));
    assert_eq!(shot.up, Some(Decimal::new(200, 2)));
    assert_eq!(shot.down, Some(Decimal::new(300, 2)));
    assert_eq!(shot.right, Some(Decimal::new(400, 2)));
}

#[test]
fn test_error_carries_physical_line_number() {
    let first = create_test_section("A", None, &["A1 A2 1.00 0.00 0.00 0 0 0 0"]);
    let second = create_test_section(
        "B",
        None,
        &[
            "B1 B2 1.00 0.00 0.00 0 0 0 0",
            "B2 B3 1.00 north 0.00 0 0 0 0",
        ],
    );
    let text = format!("{}{}", first, second);

    let err = CompassParser::new().parse_str("Cave", &text).unwrap_err();

    // first section: 9 header lines, 1 shot, form feed
    let expected = (HEADER_LINES + 1 + 1) + HEADER_LINES + 2;
    assert_eq!(err.line(), Some(expected));
    assert!(err
        .to_string()
        .starts_with(&format!("Error while reading line {} of survey file", expected)));

    match err {
        Error::Parse { source, .. } => {
            assert!(matches!(*source, Error::InvalidNumber { field: "azimuth", .. }))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_invalid_format_reports_header_line() {
    let text = create_test_section("A", Some("DDDDLUDRLA"), &[]);
    let err = CompassParser::new().parse_str("Cave", &text).unwrap_err();

    assert_eq!(err.line(), Some(6));
    assert!(err.to_string().contains("Format string invalid: DDDDLUDRLA"));
}

#[test]
fn test_malformed_date_reports_line_three() {
    let text = create_test_section("A", None, &[]).replace("7 10 79", "7 X 79");
    let err = CompassParser::new().parse_str("Cave", &text).unwrap_err();
    assert_eq!(err.line(), Some(3));
}

#[test]
fn test_incomplete_shot_is_an_error() {
    let text = create_test_section("A", None, &["A1 A2 10.00 90.00"]);
    let err = CompassParser::new().parse_str("Cave", &text).unwrap_err();

    assert_eq!(err.line(), Some(HEADER_LINES + 1));
    assert!(err.to_string().contains("expected at least 5 fields, found 4"));
}

#[test]
fn test_blank_data_lines_are_skipped() {
    let text = create_test_section(
        "A",
        None,
        &[
            "A1 A2 1.00 0.00 0.00 0 0 0 0",
            "   ",
            "A2 A3 1.00 0.00 0.00 0 0 0 0",
        ],
    );
    let result = CompassParser::new().parse_str("Cave", &text).unwrap();
    assert_eq!(result.cave.shot_count(), 2);
}

#[test]
fn test_duplicate_shots_and_surveys_are_dropped() {
    let shots = [
        "A1 A2 1.00 0.00 0.00 0 0 0 0",
        "A1 A2 2.00 0.00 0.00 0 0 0 0",
    ];
    let text = format!(
        "{}{}",
        create_test_section("A", None, &shots),
        create_test_section("A", None, &["X1 X2 1.00 0.00 0.00 0 0 0 0"])
    );
    let result = CompassParser::new().parse_str("Cave", &text).unwrap();

    assert_eq!(result.cave.surveys().len(), 1);
    assert_eq!(result.cave.surveys()[0].shots().len(), 1);
    assert_eq!(result.cave.surveys()[0].shots()[0].length, Decimal::new(100, 2));
    assert_eq!(result.stats.duplicate_shots, 1);
    assert_eq!(result.stats.duplicate_surveys, 1);
    assert_eq!(result.stats.sections, 2);
    // the shot of the dropped section is not counted
    assert_eq!(result.stats.shots, 1);
}

#[test]
fn test_unterminated_last_section_is_discarded() {
    let text = format!(
        "{}{}",
        create_test_section("A", None, &["A1 A2 1.00 0.00 0.00 0 0 0 0"]),
        create_test_section("B", None, &["B1 B2 1.00 0.00 0.00 0 0 0 0"])
            .replace("\u{000C}\r\n", "")
    );
    let result = CompassParser::new().parse_str("Cave", &text).unwrap();

    assert_eq!(result.cave.surveys().len(), 1);
    assert_eq!(result.cave.surveys()[0].name, "A");
    assert_eq!(result.stats.surveys, 1);
    assert_eq!(result.stats.shots, 1);
    assert!(result.stats.unterminated);
}

#[test]
fn test_truncated_header_is_discarded() {
    let text = "SECRET CAVE\r\nSURVEY NAME: A\r\n";
    let result = CompassParser::new().parse_str("Cave", text).unwrap();
    assert!(result.cave.surveys().is_empty());
    assert!(result.stats.unterminated);
}

#[test]
fn test_oversized_reading_reports_line() {
    let text = create_test_section(
        "A",
        Some("RDDDLRUDLAD"),
        &["A1 A2 1.00 79228162514264337593543950335 0.00 0 0 0 0"],
    );

    let err = CompassParser::new().parse_str("Cave", &text).unwrap_err();
    assert_eq!(err.line(), Some(HEADER_LINES + 1));
    match err {
        Error::Parse { source, .. } => {
            assert!(matches!(*source, Error::Conversion { .. }))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_empty_input() {
    let result = CompassParser::new().parse_str("Cave", "").unwrap();
    assert!(result.cave.surveys().is_empty());
    assert_eq!(result.stats, ParseStats::new());
}

#[test]
fn test_parse_bytes_in_declared_charset() {
    let text = create_test_section("A", None, &["A1 A2 1.00 0.00 0.00 0 0 0 0 Durchgang"])
        .replace("D. Smith", "J. M\u{fc}ller");
    let bytes = Charset::Windows1252.encode(&text).unwrap();

    let result = CompassParser::new()
        .parse("Cave", &bytes, Charset::Windows1252)
        .unwrap();
    assert_eq!(result.cave.surveys()[0].cavers[0], "J. M\u{fc}ller");
}

#[test]
fn test_repeated_form_feeds_add_no_survey() {
    let text = format!(
        "{}\u{000C}\r\n{}",
        create_test_section("A", None, &["A1 A2 1.00 0.00 0.00 0 0 0 0"]),
        create_test_section("B", None, &["B1 B2 1.00 0.00 0.00 0 0 0 0"])
    );
    let result = CompassParser::new().parse_str("Cave", &text).unwrap();

    assert_eq!(result.cave.surveys().len(), 2);
    assert_eq!(result.stats.sections, 2);
    assert_eq!(result.stats.duplicate_surveys, 0);
}
