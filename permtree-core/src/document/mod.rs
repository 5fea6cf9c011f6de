/*
    document - The exported permission-tree document

    One nested, human-readable structure: subserver nodes with their
    rooms and attached users, a top-level elevation list, and a
    top-level list of global users. Serialized as pretty-printed JSON;
    the loader in this module's `load` submodule parses it back into
    flat tables.
*/

use serde::{Deserialize, Serialize};

mod load;

pub use load::{load, parse_document, LoadError, LoadResult};

/// Root of the exported document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub subservers: Vec<NodeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elevations: Vec<ElevationEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub global_users: Vec<UserEntry>,
}

/// A subserver or room node. Subservers carry no password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Resolved sector attribute: declared or inherited sectors plus
    /// any accumulated during user placement, first seen first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sectors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<UserEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rooms: Vec<NodeEntry>,
}

/// Elevation with its privilege flags packed into an integer mask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevationEntry {
    pub name: String,
    pub privilege: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sectors: Vec<String>,
}

/// A user attached to a node, or listed globally at the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sectors: Vec<String>,
    pub elevation: String,
}

impl Document {
    /// Render to the single-document text form.
    pub fn to_text(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
