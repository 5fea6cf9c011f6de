//! Test fixtures for building table states
//!
//! Builder and factory helpers used across the engine test modules.

use crate::model::{Elevation, PrivilegeSet, Room, Subserver, User};
use crate::store::Tables;

/// Convert a slice of string literals into a sector list.
fn sectors(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Builder for table states used in tests.
pub struct TablesBuilder {
    tables: Tables,
}

impl TablesBuilder {
    pub fn new() -> Self {
        Self { tables: Tables::new() }
    }

    pub fn subserver(mut self, name: &str, sector_list: &[&str]) -> Self {
        self.tables.subservers.push(Subserver::new(name, sectors(sector_list)));
        self
    }

    pub fn room(mut self, name: &str, parent: &str, sector_list: &[&str]) -> Self {
        self.tables
            .rooms
            .push(Room::new(name, format!("{name}-hash"), parent, sectors(sector_list)));
        self
    }

    pub fn elevation(mut self, name: &str, mask: u16, sector_list: &[&str]) -> Self {
        self.tables.elevations.push(Elevation::new(
            name,
            PrivilegeSet::decode(mask as u64).expect("fixture mask in range"),
            sectors(sector_list),
        ));
        self
    }

    pub fn user(mut self, username: &str, sector_list: &[&str]) -> Self {
        self.tables
            .users
            .push(User::new(username, format!("{username}-hash"), sectors(sector_list)));
        self
    }

    pub fn global_user(mut self, username: &str, sector_list: &[&str]) -> Self {
        self.tables
            .users
            .push(User::global(username, format!("{username}-hash"), sectors(sector_list)));
        self
    }

    pub fn build(self) -> Tables {
        self.tables
    }
}

impl Default for TablesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
