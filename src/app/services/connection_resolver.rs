//! Connection inference between survey sections
//!
//! Compass files do not declare how surveys join. Stations are identified by
//! name across the whole file, so two surveys that both use a station name
//! are connected at that station.

use tracing::{debug, info};

use crate::app::models::{Cave, Connection};

/// Attaches [`Connection`]s to a parsed cave
pub trait ConnectionResolver {
    /// Add connections to the cave in place
    fn resolve(&self, cave: &mut Cave);
}

/// Treats station names as one namespace shared by every survey
///
/// Pairs are visited in cave order and the earlier survey is always the
/// `from` side, so each shared station yields exactly one connection per
/// survey pair and output order is stable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatNamespaceResolver;

impl ConnectionResolver for FlatNamespaceResolver {
    fn resolve(&self, cave: &mut Cave) {
        let mut found = Vec::new();

        let surveys = cave.surveys();
        let stations: Vec<_> = surveys.iter().map(|s| s.station_names()).collect();

        for (i, first) in surveys.iter().enumerate() {
            for (j, second) in surveys.iter().enumerate().skip(i + 1) {
                for station in stations[i].intersection(&stations[j]) {
                    debug!("Station {} shared by {} and {}", station, first.name, second.name);
                    found.push(Connection::new(
                        *station,
                        first.name.as_str(),
                        *station,
                        second.name.as_str(),
                    ));
                }
            }
        }

        let mut added = 0;
        for connection in found {
            if cave.add_connection(connection) {
                added += 1;
            }
        }
        info!("Resolved {} connections between surveys", added);
    }
}

/// Leaves every survey unconnected
#[derive(Debug, Default, Clone, Copy)]
pub struct DisconnectedResolver;

impl ConnectionResolver for DisconnectedResolver {
    fn resolve(&self, _cave: &mut Cave) {
        debug!("Connection inference disabled");
    }
}
