/*
    model - Entity row types

    The four flat tables the engine works on: subservers, rooms,
    elevations and users. Rows are plain typed records with named
    fields; the editing front end owns their contents and the engine
    only ever reads them (or bulk-replaces whole tables on load).
*/

use serde::{Deserialize, Serialize};
use std::fmt;

mod privileges;

pub use privileges::{Privilege, PrivilegeError, PrivilegeSet, NUM_PRIVILEGES};

/// Top-level node of the permission tree. Subservers have no parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subserver {
    pub name: String,
    /// Sector tags this subserver owns. May be empty, in which case the
    /// subserver inherits sectors from a descendant room during export.
    #[serde(default)]
    pub sectors: Vec<String>,
}

impl Subserver {
    pub fn new(name: impl Into<String>, sectors: Vec<String>) -> Self {
        Subserver { name: name.into(), sectors }
    }
}

/// Interior tree node. A room is parented to a subserver or to another
/// room, forming a tree of arbitrary depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    /// Opaque, pre-hashed by the caller before it reaches the engine.
    pub password: String,
    /// Name of the parent subserver or room.
    pub parent: String,
    #[serde(default)]
    pub sectors: Vec<String>,
}

impl Room {
    pub fn new(
        name: impl Into<String>,
        password: impl Into<String>,
        parent: impl Into<String>,
        sectors: Vec<String>,
    ) -> Self {
        Room {
            name: name.into(),
            password: password.into(),
            parent: parent.into(),
            sectors,
        }
    }
}

/// Named privilege bundle associated with one or more sectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elevation {
    pub name: String,
    pub privileges: PrivilegeSet,
    #[serde(default)]
    pub sectors: Vec<String>,
}

impl Elevation {
    pub fn new(name: impl Into<String>, privileges: PrivilegeSet, sectors: Vec<String>) -> Self {
        Elevation { name: name.into(), privileges, sectors }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// Opaque, pre-hashed by the caller before it reaches the engine.
    pub password: String,
    /// Sectors the user belongs to; drives elevation lookup and tree
    /// placement during export.
    #[serde(default)]
    pub sectors: Vec<String>,
    /// Global users are attached to the document root instead of being
    /// resolved onto tree nodes via their sectors.
    #[serde(default)]
    pub global: bool,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        sectors: Vec<String>,
    ) -> Self {
        User {
            username: username.into(),
            password: password.into(),
            sectors,
            global: false,
        }
    }

    pub fn global(
        username: impl Into<String>,
        password: impl Into<String>,
        sectors: Vec<String>,
    ) -> Self {
        User {
            username: username.into(),
            password: password.into(),
            sectors,
            global: true,
        }
    }
}

/// Which table an entity row came from; used for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Subserver,
    Room,
    Elevation,
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Subserver => "subserver",
            EntityKind::Room => "room",
            EntityKind::Elevation => "elevation",
            EntityKind::User => "user",
        };
        write!(f, "{}", s)
    }
}

/// Canonical form of an entity name for uniqueness and parent lookups:
/// surrounding whitespace stripped, lower-cased.
pub fn normalized(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Canonical form of a declared sector list: entries trimmed, empties
/// dropped, duplicates removed, declaration order preserved.
pub fn clean_sectors(raw: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for sector in raw {
        let sector = sector.trim();
        if sector.is_empty() {
            continue;
        }
        if !out.iter().any(|s| s == sector) {
            out.push(sector.to_string());
        }
    }
    out
}
