/*
    placement.rs - Resolving users onto tree nodes and elevations

    Each non-global user must land on exactly one elevation via its
    sectors, then on the tree nodes owning those sectors. When both an
    ancestor and a descendant own one of the user's sectors, only the
    descendant keeps the user: the ancestor usually owns the sector
    through propagation from that same descendant, and inserting the
    user along the whole chain would duplicate it. Unrelated owners all
    keep the user; that fan-out is intended.

    Global users skip tree placement entirely and are emitted once at
    the document root, but their elevation is still resolved and
    checked like everyone else's.
*/

use std::collections::HashMap;

use tracing::warn;

use crate::document::UserEntry;
use crate::export::errors::{ExportError, ExportResult};
use crate::export::sectors::SectorMap;
use crate::export::tree::Forest;
use crate::model::{clean_sectors, Elevation, User};

#[derive(Debug)]
pub(crate) struct Placements {
    /// User entries attached to each node, in user table order.
    pub node_users: Vec<Vec<UserEntry>>,
    /// Output sector attribute per node: the resolved list plus any
    /// user sectors accumulated during placement, first seen first.
    pub node_sectors: Vec<Vec<String>>,
    /// Users emitted once at the document root.
    pub global_users: Vec<UserEntry>,
}

pub(crate) fn resolve(
    users: &[User],
    forest: &Forest,
    sector_map: &SectorMap,
    elevations: &[Elevation],
) -> ExportResult<Placements> {
    let elevation_by_sector = elevation_lookup(elevations);

    let mut node_users: Vec<Vec<UserEntry>> = vec![Vec::new(); forest.nodes.len()];
    let mut node_sectors: Vec<Vec<String>> = (0..forest.nodes.len())
        .map(|idx| sector_map.resolved(idx).to_vec())
        .collect();
    let mut global_users = Vec::new();

    for user in users {
        let sectors = clean_sectors(&user.sectors);
        let elevation = resolve_elevation(user, &sectors, &elevation_by_sector, elevations)?;

        let entry = UserEntry {
            username: user.username.trim().to_string(),
            password: user.password.clone(),
            sectors: sectors.clone(),
            elevation: elevation.name.clone(),
        };

        if user.global {
            global_users.push(entry);
            continue;
        }

        // collect owner nodes across all of the user's sectors
        let mut selected: Vec<usize> = Vec::new();
        for sector in &sectors {
            for &node in sector_map.owners(sector) {
                if !node_sectors[node].iter().any(|s| s == sector) {
                    node_sectors[node].push(sector.clone());
                }
                if !selected.contains(&node) {
                    selected.push(node);
                }
            }
        }

        if selected.is_empty() {
            warn!(user = %entry.username, "user's sectors own no tree node, skipping placement");
            continue;
        }

        // keep only the deepest node along any ancestor/descendant
        // chain present in the selection
        for &node in &selected {
            let shadowed = selected
                .iter()
                .any(|&other| other != node && forest.is_descendant(other, node));
            if !shadowed {
                node_users[node].push(entry.clone());
            }
        }
    }

    Ok(Placements { node_users, node_sectors, global_users })
}

/// sector -> elevation index. A sector declared by several elevations
/// keeps the last declaration; the clash only becomes an error when a
/// user's sectors actually span two elevations.
fn elevation_lookup(elevations: &[Elevation]) -> HashMap<String, usize> {
    let mut lookup = HashMap::new();
    for (idx, elevation) in elevations.iter().enumerate() {
        for sector in clean_sectors(&elevation.sectors) {
            lookup.insert(sector, idx);
        }
    }
    lookup
}

fn resolve_elevation<'a>(
    user: &User,
    sectors: &[String],
    lookup: &HashMap<String, usize>,
    elevations: &'a [Elevation],
) -> ExportResult<&'a Elevation> {
    let mut found: Option<usize> = None;
    for sector in sectors {
        let Some(&idx) = lookup.get(sector) else { continue };
        match found {
            None => found = Some(idx),
            Some(previous) if previous != idx => {
                return Err(ExportError::ConflictingElevation {
                    user: user.username.trim().to_string(),
                });
            }
            Some(_) => {}
        }
    }
    match found {
        Some(idx) => Ok(&elevations[idx]),
        None => Err(ExportError::MissingElevation {
            user: user.username.trim().to_string(),
        }),
    }
}
