//! Shared helpers for the test suite

mod fixtures;

pub use fixtures::TablesBuilder;
