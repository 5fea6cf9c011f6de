//! permtree-core - hierarchy resolution and export engine
//!
//! Turns four flat, independently edited tables (subservers, rooms,
//! elevations, users) into one nested permission-tree document and
//! back. The engine validates uniqueness and referential integrity,
//! builds an arbitrarily deep tree from flat parent references,
//! propagates sector tags through the tree, resolves users onto their
//! most specific nodes, and packs privilege flags into a fixed-width
//! bitmask. It is single-threaded, synchronous, and works with no UI
//! attached; front ends supply rows and receive either updated tables
//! or an error message.

pub mod config;
pub mod document;
pub mod export;
pub mod logging;
pub mod model;
pub mod store;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod tests;

pub use document::{load, Document, LoadError, LoadResult};
pub use export::{build_document, export, export_with, ExportError, ExportOptions, ExportResult};
pub use logging::{init_logging, init_logging_with_config, LogConfig, LogLevel};
pub use model::{
    Elevation, EntityKind, Privilege, PrivilegeSet, Room, Subserver, User, NUM_PRIVILEGES,
};
pub use store::{StoreError, StoreResult, TableId, TableRows, Tables};
