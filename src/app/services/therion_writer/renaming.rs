//! Collision-free renaming of identifiers Therion cannot parse
//!
//! Survey and station names are join keys in Therion, so any name with a
//! character outside `[A-Za-z0-9_]` is replaced by the smallest positive
//! integer not yet taken. Every reference to a renamed identifier is
//! rewritten with it.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::info;

use crate::app::models::Cave;

/// Number of identifiers changed by a renaming pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenameSummary {
    pub surveys: usize,
    pub stations: usize,
    pub cavers: usize,
}

/// Run survey, station and caver renaming in that order
pub fn rename_identifiers(cave: &mut Cave, unsafe_name: &Regex) -> RenameSummary {
    RenameSummary {
        surveys: rename_surveys(cave, unsafe_name),
        stations: rename_stations(cave, unsafe_name),
        cavers: sanitize_cavers(cave),
    }
}

/// Smallest integer from `counter` upwards that is not in `used`
fn next_free_name(counter: &mut u64, used: &HashSet<String>) -> String {
    loop {
        let candidate = counter.to_string();
        if !used.contains(&candidate) {
            return candidate;
        }
        *counter += 1;
    }
}

/// Replace unsafe survey names, scanning surveys in cave order
pub fn rename_surveys(cave: &mut Cave, unsafe_name: &Regex) -> usize {
    let mut used: HashSet<String> = cave.surveys().iter().map(|s| s.name.clone()).collect();
    let mut renames = HashMap::new();
    let mut counter = 1;

    for survey in cave.surveys_mut() {
        if !unsafe_name.is_match(&survey.name) {
            continue;
        }

        let new_name = next_free_name(&mut counter, &used);
        info!("Renaming survey {} to {}", survey.name, new_name);

        used.remove(&survey.name);
        used.insert(new_name.clone());
        let old_name = std::mem::replace(&mut survey.name, new_name.clone());
        renames.insert(old_name, new_name);
    }

    for connection in cave.connections_mut() {
        if let Some(new_name) = renames.get(&connection.from_survey) {
            connection.from_survey = new_name.clone();
        }
        if let Some(new_name) = renames.get(&connection.to_survey) {
            connection.to_survey = new_name.clone();
        }
    }

    renames.len()
}

/// Replace unsafe station names in first-seen order across all surveys
///
/// Stations share one namespace, so the same old name maps to the same new
/// name in every survey and connection.
pub fn rename_stations(cave: &mut Cave, unsafe_name: &Regex) -> usize {
    let mut seen = Vec::new();
    let mut used = HashSet::new();
    for shot in cave.surveys().iter().flat_map(|s| s.shots()) {
        for station in [&shot.from, &shot.to] {
            if used.insert(station.clone()) {
                seen.push(station.clone());
            }
        }
    }

    let mut renames = HashMap::new();
    let mut counter = 1;
    for old_name in seen {
        if !unsafe_name.is_match(&old_name) {
            continue;
        }

        let new_name = next_free_name(&mut counter, &used);
        info!("Renaming station {} to {}", old_name, new_name);

        used.remove(&old_name);
        used.insert(new_name.clone());
        renames.insert(old_name, new_name);
    }

    if renames.is_empty() {
        return 0;
    }

    let rename = |station: &mut String| {
        if let Some(new_name) = renames.get(station.as_str()) {
            *station = new_name.clone();
        }
    };

    for survey in cave.surveys_mut() {
        for shot in survey.shots_mut() {
            rename(&mut shot.from);
            rename(&mut shot.to);
        }
    }
    for connection in cave.connections_mut() {
        rename(&mut connection.from_station);
        rename(&mut connection.to_station);
    }

    renames.len()
}

/// Replace spaces in caver names with underscores
pub fn sanitize_cavers(cave: &mut Cave) -> usize {
    let mut changed = 0;
    for survey in cave.surveys_mut() {
        for caver in &mut survey.cavers {
            if caver.contains(' ') {
                *caver = caver.replace(' ', "_");
                changed += 1;
            }
        }
    }
    changed
}
