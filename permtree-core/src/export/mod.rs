/*
    export - The export pipeline

    Turns the four flat tables into one nested permission-tree
    document: uniqueness validation, tree building, sector
    propagation, user placement, then serialization. Every pass runs
    to completion before the first byte is written, so a failed export
    never leaves a partial document behind.
*/

use std::io::Write;
use std::mem;

use tracing::info;

use crate::document::{Document, ElevationEntry, NodeEntry};
use crate::model::clean_sectors;
use crate::store::Tables;

mod errors;
pub(crate) mod placement;
pub(crate) mod sectors;
pub(crate) mod tree;
pub(crate) mod validate;

pub use errors::{ExportError, ExportResult};

use placement::Placements;
use tree::Forest;

/// Options for the final rendering step.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Pretty-print the document. On by default; the document is meant
    /// to be read and diffed by humans.
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions { pretty: true }
    }
}

/// Run the full pipeline and write the document to `sink`.
pub fn export(tables: &Tables, sink: &mut impl Write) -> ExportResult<()> {
    export_with(tables, sink, &ExportOptions::default())
}

/// [`export`] with explicit rendering options.
pub fn export_with(
    tables: &Tables,
    sink: &mut impl Write,
    options: &ExportOptions,
) -> ExportResult<()> {
    let document = build_document(tables)?;
    let text = document.to_text(options.pretty)?;
    sink.write_all(text.as_bytes())?;
    sink.write_all(b"\n")?;
    info!(
        subservers = tables.subservers.len(),
        rooms = tables.rooms.len(),
        users = tables.users.len(),
        "exported document"
    );
    Ok(())
}

/// Run every validation and resolution pass and assemble the document
/// without writing it anywhere.
pub fn build_document(tables: &Tables) -> ExportResult<Document> {
    validate::check_unique(tables)?;
    if tables.subservers.is_empty() {
        return Err(ExportError::EmptyDocument);
    }

    let forest = Forest::build(&tables.subservers, &tables.rooms)?;
    let sector_map = sectors::propagate(&forest);
    let placements = placement::resolve(&tables.users, &forest, &sector_map, &tables.elevations)?;

    Ok(assemble(&forest, placements, tables))
}

fn assemble(forest: &Forest, mut placements: Placements, tables: &Tables) -> Document {
    let subservers = forest
        .roots
        .clone()
        .into_iter()
        .map(|root| node_entry(forest, root, &mut placements))
        .collect();

    let elevations = tables
        .elevations
        .iter()
        .map(|elevation| ElevationEntry {
            name: elevation.name.trim().to_string(),
            privilege: elevation.privileges.encode(),
            sectors: clean_sectors(&elevation.sectors),
        })
        .collect();

    Document {
        subservers,
        elevations,
        global_users: mem::take(&mut placements.global_users),
    }
}

fn node_entry(forest: &Forest, idx: usize, placements: &mut Placements) -> NodeEntry {
    let node = &forest.nodes[idx];
    NodeEntry {
        name: node.name.clone(),
        password: node.password.clone(),
        sectors: mem::take(&mut placements.node_sectors[idx]),
        users: mem::take(&mut placements.node_users[idx]),
        rooms: node
            .children
            .clone()
            .into_iter()
            .map(|child| node_entry(forest, child, placements))
            .collect(),
    }
}
