/*
    load.rs - Parsing a document back into the four flat tables

    Walks the nested document depth-first, flattening every node into a
    row and re-deriving each room's parent from its position in the
    tree. Validation is per row: each entry either yields a row or an
    error naming the entity kind and the missing attribute. Tables are
    only replaced once the whole parse has succeeded; a failed load
    leaves the session untouched.
*/

use std::collections::HashSet;
use std::io::Read;

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::model::{
    normalized, Elevation, EntityKind, PrivilegeError, PrivilegeSet, Room, Subserver, User,
};
use crate::store::Tables;

/// Result type for load operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that abort a load. Tables are never partially replaced.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading the source failed
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    /// The source is empty or is not a well-formed document
    #[error("could not parse document: {0}")]
    Unparsable(String),

    /// A well-formed document with no subservers has no tree to load
    #[error("document contains no subservers")]
    NoSubservers,

    /// A node or user entry lacks a required attribute
    #[error("{kind} is missing required attribute '{field}'")]
    MissingField { kind: EntityKind, field: &'static str },

    /// An elevation's privilege mask does not fit the flag width
    #[error("elevation '{name}': {source}")]
    InvalidPrivilege {
        name: String,
        #[source]
        source: PrivilegeError,
    },
}

/// Read a whole document from `source` and replace all four tables.
/// On any error the tables keep their previous contents.
pub fn load(tables: &mut Tables, source: &mut impl Read) -> LoadResult<()> {
    let mut text = String::new();
    source.read_to_string(&mut text)?;
    if text.trim().is_empty() {
        return Err(LoadError::Unparsable("document is empty".to_string()));
    }
    let value: Value =
        serde_json::from_str(&text).map_err(|e| LoadError::Unparsable(e.to_string()))?;

    let loaded = parse_document(&value)?;
    info!(
        subservers = loaded.subservers.len(),
        rooms = loaded.rooms.len(),
        elevations = loaded.elevations.len(),
        users = loaded.users.len(),
        "loaded document"
    );
    *tables = loaded;
    Ok(())
}

/// Flatten a parsed document into fresh tables without touching any
/// session state.
pub fn parse_document(value: &Value) -> LoadResult<Tables> {
    let root = value
        .as_object()
        .ok_or_else(|| LoadError::Unparsable("document root is not an object".to_string()))?;

    let subservers = match root.get("subservers").and_then(Value::as_array) {
        Some(entries) if !entries.is_empty() => entries,
        _ => return Err(LoadError::NoSubservers),
    };

    let mut tables = Tables::new();
    // a user placed onto several unrelated nodes appears once per
    // node in the document; collapse back to one row
    let mut seen_users: HashSet<String> = HashSet::new();

    for entry in subservers {
        let name = require_str(entry, "name", EntityKind::Subserver)?;
        tables.subservers.push(Subserver {
            name: name.to_string(),
            sectors: sectors_of(entry),
        });
        parse_users(entry, false, &mut tables, &mut seen_users)?;
        parse_rooms(entry, name, &mut tables, &mut seen_users)?;
    }

    for entry in array_of(root.get("elevations")) {
        let name = require_str(entry, "name", EntityKind::Elevation)?;
        let mask = match entry.get("privilege") {
            None | Some(Value::Null) => {
                return Err(LoadError::MissingField {
                    kind: EntityKind::Elevation,
                    field: "privilege",
                });
            }
            Some(value) => value.as_u64().ok_or_else(|| {
                LoadError::Unparsable(format!(
                    "elevation '{}' has a non-integer privilege attribute",
                    name
                ))
            })?,
        };
        let privileges =
            PrivilegeSet::decode(mask).map_err(|source| LoadError::InvalidPrivilege {
                name: name.to_string(),
                source,
            })?;
        tables.elevations.push(Elevation {
            name: name.to_string(),
            privileges,
            sectors: sectors_of(entry),
        });
    }

    for entry in array_of(root.get("global_users")) {
        push_user(entry, true, &mut tables, &mut seen_users)?;
    }

    Ok(tables)
}

fn parse_rooms(
    parent: &Value,
    parent_name: &str,
    tables: &mut Tables,
    seen_users: &mut HashSet<String>,
) -> LoadResult<()> {
    for entry in array_of(parent.get("rooms")) {
        let name = require_str(entry, "name", EntityKind::Room)?;
        let password = require_str(entry, "password", EntityKind::Room)?;
        tables.rooms.push(Room {
            name: name.to_string(),
            password: password.to_string(),
            parent: parent_name.to_string(),
            sectors: sectors_of(entry),
        });
        parse_users(entry, false, tables, seen_users)?;
        parse_rooms(entry, name, tables, seen_users)?;
    }
    Ok(())
}

fn parse_users(
    node: &Value,
    global: bool,
    tables: &mut Tables,
    seen_users: &mut HashSet<String>,
) -> LoadResult<()> {
    for entry in array_of(node.get("users")) {
        push_user(entry, global, tables, seen_users)?;
    }
    Ok(())
}

fn push_user(
    entry: &Value,
    global: bool,
    tables: &mut Tables,
    seen_users: &mut HashSet<String>,
) -> LoadResult<()> {
    let username = require_str(entry, "username", EntityKind::User)?;
    let password = require_str(entry, "password", EntityKind::User)?;
    if !seen_users.insert(normalized(username)) {
        return Ok(());
    }
    tables.users.push(User {
        username: username.to_string(),
        password: password.to_string(),
        sectors: sectors_of(entry),
        global,
    });
    Ok(())
}

fn require_str<'a>(
    entry: &'a Value,
    field: &'static str,
    kind: EntityKind,
) -> LoadResult<&'a str> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or(LoadError::MissingField { kind, field })
}

fn sectors_of(entry: &Value) -> Vec<String> {
    array_of(entry.get("sectors"))
        .iter()
        .filter_map(|v| v.as_str())
        .map(str::to_string)
        .collect()
}

fn array_of(value: Option<&Value>) -> &[Value] {
    value.and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_str(text: &str) -> LoadResult<Tables> {
        let mut tables = Tables::new();
        load(&mut tables, &mut text.as_bytes())?;
        Ok(tables)
    }

    #[test]
    fn test_load_minimal_document() {
        let tables = load_str(
            r#"{"subservers": [{"name": "hub", "sectors": ["ops"],
                "rooms": [{"name": "annex", "password": "h4sh",
                           "users": [{"username": "ada", "password": "pw",
                                      "sectors": ["ops"], "elevation": "admin"}]}]}],
                "elevations": [{"name": "admin", "privilege": 1023, "sectors": ["ops"]}]}"#,
        )
        .unwrap();

        assert_eq!(tables.subservers.len(), 1);
        assert_eq!(tables.rooms.len(), 1);
        assert_eq!(tables.rooms[0].parent, "hub");
        assert_eq!(tables.users.len(), 1);
        assert!(!tables.users[0].global);
        assert_eq!(tables.elevations[0].privileges.encode(), 1023);
    }

    #[test]
    fn test_load_nested_room_parent_is_enclosing_room() {
        let tables = load_str(
            r#"{"subservers": [{"name": "hub",
                "rooms": [{"name": "outer", "password": "a",
                           "rooms": [{"name": "inner", "password": "b"}]}]}]}"#,
        )
        .unwrap();
        assert_eq!(tables.rooms.len(), 2);
        assert_eq!(tables.rooms[0].parent, "hub");
        assert_eq!(tables.rooms[1].parent, "outer");
    }

    #[test]
    fn test_load_global_users() {
        let tables = load_str(
            r#"{"subservers": [{"name": "hub"}],
                "global_users": [{"username": "root", "password": "pw",
                                  "sectors": [], "elevation": "admin"}]}"#,
        )
        .unwrap();
        assert_eq!(tables.users.len(), 1);
        assert!(tables.users[0].global);
    }

    #[test]
    fn test_load_duplicate_user_entries_collapse() {
        let tables = load_str(
            r#"{"subservers": [
                {"name": "hub",
                 "users": [{"username": "ada", "password": "pw", "elevation": "e"}]},
                {"name": "spoke",
                 "users": [{"username": "ada", "password": "pw", "elevation": "e"}]}]}"#,
        )
        .unwrap();
        assert_eq!(tables.users.len(), 1);
    }

    #[test]
    fn test_load_empty_source() {
        assert!(matches!(load_str("  "), Err(LoadError::Unparsable(_))));
    }

    #[test]
    fn test_load_not_json() {
        assert!(matches!(load_str("<root/>"), Err(LoadError::Unparsable(_))));
    }

    #[test]
    fn test_load_no_subservers() {
        assert!(matches!(load_str(r#"{"subservers": []}"#), Err(LoadError::NoSubservers)));
        assert!(matches!(load_str(r#"{}"#), Err(LoadError::NoSubservers)));
    }

    #[test]
    fn test_load_missing_fields() {
        let err = load_str(r#"{"subservers": [{"sectors": []}]}"#).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingField { kind: EntityKind::Subserver, field: "name" }
        ));

        let err = load_str(r#"{"subservers": [{"name": "hub", "rooms": [{"name": "r"}]}]}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingField { kind: EntityKind::Room, field: "password" }
        ));

        let err = load_str(
            r#"{"subservers": [{"name": "hub", "users": [{"username": "ada"}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingField { kind: EntityKind::User, field: "password" }
        ));
    }

    #[test]
    fn test_load_missing_privilege() {
        let err = load_str(
            r#"{"subservers": [{"name": "hub"}], "elevations": [{"name": "admin"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingField { kind: EntityKind::Elevation, field: "privilege" }
        ));
    }

    #[test]
    fn test_load_out_of_range_privilege() {
        let err = load_str(
            r#"{"subservers": [{"name": "hub"}],
                "elevations": [{"name": "admin", "privilege": 1024}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::InvalidPrivilege { .. }));
    }

    #[test]
    fn test_failed_load_leaves_tables_untouched() {
        let mut tables = Tables::new();
        tables.subservers.push(Subserver::new("kept", vec![]));

        let result = load(&mut tables, &mut r#"{"subservers": [{}]}"#.as_bytes());
        assert!(result.is_err());
        assert_eq!(tables.subservers.len(), 1);
        assert_eq!(tables.subservers[0].name, "kept");
    }
}
