//! Uniqueness validation, the first export pass.
//!
//! Names are compared after trimming and lower-casing. Rooms share a
//! namespace with subservers; elevations and users each have their
//! own. The first collision in table order wins.

use std::collections::HashSet;

use crate::export::errors::{ExportError, ExportResult};
use crate::model::{normalized, EntityKind};
use crate::store::Tables;

pub(crate) fn check_unique(tables: &Tables) -> ExportResult<()> {
    let mut node_names = HashSet::new();
    for subserver in &tables.subservers {
        if !node_names.insert(normalized(&subserver.name)) {
            return Err(duplicate(EntityKind::Subserver, &subserver.name));
        }
    }
    for room in &tables.rooms {
        if !node_names.insert(normalized(&room.name)) {
            return Err(duplicate(EntityKind::Room, &room.name));
        }
    }

    let mut elevation_names = HashSet::new();
    for elevation in &tables.elevations {
        if !elevation_names.insert(normalized(&elevation.name)) {
            return Err(duplicate(EntityKind::Elevation, &elevation.name));
        }
    }

    let mut usernames = HashSet::new();
    for user in &tables.users {
        if !usernames.insert(normalized(&user.username)) {
            return Err(duplicate(EntityKind::User, &user.username));
        }
    }

    Ok(())
}

fn duplicate(kind: EntityKind, name: &str) -> ExportError {
    ExportError::DuplicateName { kind, name: name.trim().to_string() }
}
