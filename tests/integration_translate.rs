//! Integration tests for the Compass to Therion translation pipeline
//!
//! These tests run complete Compass documents through the parser, resolver
//! and writer, and drive the CLI command against temporary files.

use cave_translator::app::services::compass_parser::CompassParser;
use cave_translator::app::services::connection_resolver::{
    ConnectionResolver, FlatNamespaceResolver,
};
use cave_translator::app::services::therion_writer::serialize;
use cave_translator::cli::args::Args;
use cave_translator::cli::commands;
use cave_translator::{Charset, Error};
use clap::Parser;
use std::ffi::OsStr;
use tempfile::TempDir;

/// Two survey trips in one Compass file, joined at stations AB3 and AB6
const TWO_SECTION_DAT: &str = "FISHER RIDGE CAVE SYSTEM\r
SURVEY NAME: AB\r
SURVEY DATE: 5 12 98  COMMENT:Entrance series\r
SURVEY TEAM:\r
Ann Smith, Bob Jones\r
DECLINATION:    2.50  FORMAT: DDDDUDLRLADadBF  CORRECTIONS:  0.00 0.00 0.00\r
\r
        FROM           TO   LENGTH  BEARING      INC     LEFT       UP     DOWN    RIGHT   AZM2   INC2   FLAGS  COMMENTS\r
\r
AB1 AB2 15.20 12.00 -3.00 4.00 1.00 2.00 3.00 192.00 3.00\r
AB2 AB3 22.75 -999.00 -8.50 5.00 0.50 1.00 -9.90 185.00 8.50\r
AB3 AB4 9.10 97.50 2.00 3.00 2.00 2.00 2.00 277.50 -999.00 #|L# low crawl\r
AB4 AB5 30.00 110.00 0.00 6.00 3.00 4.00 2.00 290.00 0.00\r
AB5 AB6 12.40 150.00 5.50 2.00 1.00 1.00 1.00 330.00 -5.50 breakdown\r
\u{000C}\r
FISHER RIDGE CAVE SYSTEM\r
SURVEY NAME: CD\r
SURVEY DATE: 1 3 2001  COMMENT:Upper level\r
SURVEY TEAM:\r
Ann Smith, Carl Brown\r
DECLINATION:    2.50  FORMAT: DDDDUDLRLADadBF  CORRECTIONS:  0.00 0.00 0.00\r
\r
        FROM           TO   LENGTH  BEARING      INC     LEFT       UP     DOWN    RIGHT   AZM2   INC2   FLAGS  COMMENTS\r
\r
AB3 CD1 11.00 270.00 10.00 1.00 1.00 1.00 1.00 90.00 -10.00\r
CD1 CD2 8.00 280.00 4.00 1.00 1.00 1.00 1.00 100.00 -4.00\r
CD2 CD3 14.30 300.00 -2.00 1.00 1.00 1.00 1.00 120.00 2.00\r
CD3 AB6 19.90 320.00 -6.00 1.00 1.00 1.00 1.00 140.00 6.00\r
\u{000C}\r
\u{001A}\r
";

#[test]
fn test_two_section_document_end_to_end() {
    let result = CompassParser::new()
        .parse("Fisher Ridge", TWO_SECTION_DAT.as_bytes(), Charset::Utf8)
        .expect("Failed to parse sample document");
    let mut cave = result.cave;

    assert_eq!(cave.surveys().len(), 2);
    assert_eq!(cave.surveys()[0].shots().len(), 5);
    assert_eq!(cave.surveys()[1].shots().len(), 4);
    assert_eq!(result.stats.flipped_readings, 2);
    assert_eq!(result.stats.zeroed_dimensions, 1);

    FlatNamespaceResolver.resolve(&mut cave);
    assert_eq!(cave.connections().len(), 2);

    let text = serialize("UTF-8", &cave, false).expect("Failed to serialize");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "encoding UTF-8");
    assert_eq!(lines[2], "# Fisher Ridge");

    let equates: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| l.starts_with("equate "))
        .collect();
    assert_eq!(equates, vec!["equate AB3@AB AB3@CD", "equate AB6@AB AB6@CD"]);

    assert!(text.contains("survey AB -title \"Entrance series\"\n"));
    assert!(text.contains("survey CD -title \"Upper level\"\n"));
    assert!(text.contains("date 1998.5.12\n"));
    assert!(text.contains("date 2001.1.3\n"));
    assert!(text.contains("declination 2.50 degrees\n"));
    assert!(text.contains(
        "data normal from to length compass clino backcompass backclino \n"
    ));

    // foresight azimuth reconstructed as 185 - 180
    assert!(text.contains("AB2 AB3 22.75 5.00 -8.50 185.00 8.50 \n"));
    // reconstructed backsight inclination, flags dropped from the comment
    assert!(text.contains("AB3 AB4 9.10 97.50 2.00 277.50 -2.00 # low crawl\n"));
    assert!(text.contains("data dimensions station up down left right \n"));
    assert!(text.contains("AB2 5.00 0.50 1.00 0.00 \n"));
}

#[test]
fn test_cli_writes_therion_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("fisher.dat");
    let output = dir.path().join("fisher.th");
    std::fs::write(&input, TWO_SECTION_DAT).unwrap();

    let args = Args::try_parse_from([
        OsStr::new("cave-translate"),
        input.as_os_str(),
        OsStr::new("--input-charset"),
        OsStr::new("UTF-8"),
        OsStr::new("-q"),
    ])
    .unwrap();

    let stats = commands::run(args).expect("Translation failed");
    assert_eq!(stats.surveys, 2);
    assert_eq!(stats.shots, 9);
    assert_eq!(stats.connections, 2);

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("encoding UTF-8\n\n# fisher\n"));
}

#[test]
fn test_cli_refuses_existing_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("fisher.dat");
    let output = dir.path().join("existing.th");
    std::fs::write(&input, TWO_SECTION_DAT).unwrap();
    std::fs::write(&output, "keep me").unwrap();

    let args = Args::try_parse_from([
        OsStr::new("cave-translate"),
        input.as_os_str(),
        OsStr::new("-o"),
        output.as_os_str(),
        OsStr::new("-q"),
    ])
    .unwrap();

    let err = commands::run(args).unwrap_err();
    assert!(matches!(err, Error::OutputExists { .. }));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");
}

#[test]
fn test_cli_reports_parse_error_line_without_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.dat");
    let output = dir.path().join("broken.th");
    std::fs::write(
        &input,
        TWO_SECTION_DAT.replace("CD2 CD3 14.30", "CD2 CD3 14,30"),
    )
    .unwrap();

    let args = Args::try_parse_from([
        OsStr::new("cave-translate"),
        input.as_os_str(),
        OsStr::new("--input-charset"),
        OsStr::new("UTF-8"),
        OsStr::new("-q"),
    ])
    .unwrap();

    let err = commands::run(args).unwrap_err();
    assert_eq!(err.line(), Some(27));
    assert!(err
        .to_string()
        .starts_with("Error while reading line 27 of survey file"));
    assert!(!output.exists());
}

#[test]
fn test_renamed_equates_stay_consistent() {
    let document = TWO_SECTION_DAT
        .replace("SURVEY NAME: AB", "SURVEY NAME: A-B")
        .replace("AB3", "AB.3");
    let result = CompassParser::new()
        .parse("Fisher Ridge", document.as_bytes(), Charset::Utf8)
        .unwrap();
    let mut cave = result.cave;
    FlatNamespaceResolver.resolve(&mut cave);

    let text = serialize("UTF-8", &cave, true).unwrap();
    assert!(text.contains("equate 1@1 1@CD\n"));
    assert!(text.contains("survey 1 -title \"Entrance series\"\n"));
    assert!(text.contains("team \"Ann_Smith\"\n"));
    assert!(!text.contains("AB.3"));
}
