/*
    store - The four entity tables and session snapshots

    One editing session owns one Tables value. The front end edits rows
    in memory and commits them through the bulk replace_table API; the
    export pipeline reads the tables, the document loader replaces all
    four at once. Whole-session state is saved and restored as a single
    snapshot, never row by row.
*/

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use tracing::debug;

use crate::model::{Elevation, Room, Subserver, User};

mod errors;

pub use errors::{StoreError, StoreResult};

/// Identifies one of the four entity tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableId {
    Subservers,
    Rooms,
    Elevations,
    Users,
}

/// A full replacement row set for one table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRows {
    Subservers(Vec<Subserver>),
    Rooms(Vec<Room>),
    Elevations(Vec<Elevation>),
    Users(Vec<User>),
}

impl TableRows {
    pub fn table_id(&self) -> TableId {
        match self {
            TableRows::Subservers(_) => TableId::Subservers,
            TableRows::Rooms(_) => TableId::Rooms,
            TableRows::Elevations(_) => TableId::Elevations,
            TableRows::Users(_) => TableId::Users,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TableRows::Subservers(rows) => rows.len(),
            TableRows::Rooms(rows) => rows.len(),
            TableRows::Elevations(rows) => rows.len(),
            TableRows::Users(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The engine's working set: four ordered, independently edited tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default)]
    pub subservers: Vec<Subserver>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub elevations: Vec<Elevation>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl Tables {
    pub fn new() -> Self {
        Tables::default()
    }

    /// Bulk-replace one table with an ordered row set. This is the only
    /// write path the engine exposes; row-level edits belong to the
    /// front end.
    pub fn replace_table(&mut self, rows: TableRows) {
        debug!(table = ?rows.table_id(), rows = rows.len(), "replacing table");
        match rows {
            TableRows::Subservers(rows) => self.subservers = rows,
            TableRows::Rooms(rows) => self.rooms = rows,
            TableRows::Elevations(rows) => self.elevations = rows,
            TableRows::Users(rows) => self.users = rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subservers.is_empty()
            && self.rooms.is_empty()
            && self.elevations.is_empty()
            && self.users.is_empty()
    }

    /// Write the whole session state to a sink.
    pub fn save_snapshot(&self, sink: &mut impl Write) -> StoreResult<()> {
        let bytes = serde_json::to_vec(self)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        sink.write_all(&bytes)?;
        Ok(())
    }

    /// Read a whole session state back. An empty source yields empty
    /// tables; a snapshot that no longer parses is fatal to the
    /// session.
    pub fn restore_snapshot(source: &mut impl Read) -> StoreResult<Tables> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        if bytes.is_empty() {
            return Ok(Tables::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupted(e.to_string()))
    }
}
