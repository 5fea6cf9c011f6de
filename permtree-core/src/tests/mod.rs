/*
    Engine test suite

    Covers the export pipeline end to end plus the load path:
    - privilege bitmask codec
    - uniqueness validation
    - parent resolution and tree shape
    - sector propagation
    - user placement, specificity and fan-out
    - export/load round trips
    - table store and session snapshots
*/

pub mod codec_tests;

use crate::document::{Document, NodeEntry};

/// Find a top-level subserver entry by name.
pub fn subserver<'a>(document: &'a Document, name: &str) -> &'a NodeEntry {
    document
        .subservers
        .iter()
        .find(|node| node.name == name)
        .unwrap_or_else(|| panic!("no subserver named '{name}'"))
}

/// Find a node entry anywhere in the tree by name.
pub fn node<'a>(document: &'a Document, name: &str) -> &'a NodeEntry {
    fn walk<'a>(entry: &'a NodeEntry, name: &str) -> Option<&'a NodeEntry> {
        if entry.name == name {
            return Some(entry);
        }
        entry.rooms.iter().find_map(|room| walk(room, name))
    }
    document
        .subservers
        .iter()
        .find_map(|entry| walk(entry, name))
        .unwrap_or_else(|| panic!("no node named '{name}'"))
}

/// Usernames attached to every node in the tree, flattened.
pub fn all_placements(document: &Document) -> Vec<(String, String)> {
    fn walk(entry: &NodeEntry, out: &mut Vec<(String, String)>) {
        for user in &entry.users {
            out.push((entry.name.clone(), user.username.clone()));
        }
        for room in &entry.rooms {
            walk(room, out);
        }
    }
    let mut out = Vec::new();
    for entry in &document.subservers {
        walk(entry, &mut out);
    }
    out
}
