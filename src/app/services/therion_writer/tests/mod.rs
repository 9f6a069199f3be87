//! Test utilities for Therion writer testing

use rust_decimal::Decimal;

use crate::app::models::{Cave, Connection, Shot, Survey, SurveyDate};


/// Shot with only the mandatory readings, in hundredths
pub fn create_test_shot(from: &str, to: &str, length: i64, azimuth: i64, inclination: i64) -> Shot {
    Shot::new(
        from,
        to,
        Decimal::new(length, 2),
        Decimal::new(azimuth, 2),
        Decimal::new(inclination, 2),
    )
}

/// Survey with the given legs and otherwise default settings
pub fn create_test_survey(name: &str, legs: &[(&str, &str)]) -> Survey {
    let mut survey = Survey::new(name);
    for (from, to) in legs {
        survey.add_shot(create_test_shot(from, to, 1000, 0, 0));
    }
    survey
}

/// One fully populated survey using the default format
pub fn create_test_cave() -> Cave {
    let mut survey = Survey::new("A");
    survey.cave_name = "SECRET CAVE".to_string();
    survey.comment = Some("Entrance".to_string());
    survey.date = Some(SurveyDate::new(79, 7, 10));
    survey.declination = Some(Decimal::new(15, 1));
    survey.add_caver("Ann Smith");
    survey.add_caver("");

    let mut first = create_test_shot("A1", "A2", 1250, 13500, -500);
    first.left = Some(Decimal::ONE);
    first.up = Some(Decimal::new(2, 0));
    first.right = Some(Decimal::new(4, 0));
    first.comment = Some("mud".to_string());
    survey.add_shot(first);
    survey.add_shot(create_test_shot("A2", "A3", 300, 9000, 0));

    let mut cave = Cave::new("Test Cave");
    cave.add_survey(survey);
    cave
}

/// Cave whose names need renaming, joined at station `x.1`
pub fn create_unsafe_cave() -> Cave {
    let mut cave = Cave::new("Test Cave");
    cave.add_survey(create_test_survey("1", &[("1", "x.1"), ("x.1", "x.2")]));
    cave.add_survey(create_test_survey("?", &[("x.1", "y 1")]));
    cave.add_survey(create_test_survey("a", &[("y 1", "z")]));
    cave.add_survey(create_test_survey("'a", &[("z", "w")]));
    cave.add_connection(Connection::new("x.1", "1", "x.1", "?"));
    cave.add_connection(Connection::new("y 1", "?", "y 1", "a"));
    cave
}
