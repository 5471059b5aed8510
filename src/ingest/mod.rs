//! Dataset ingestion
//!
//! This module handles fetching and parsing of the two spreadsheets
//! (resources, institutions) behind the `TabularDataSource` seam, the
//! cleaning pipeline for the raw resource sheet, and the snapshot loader.

pub mod clean;
pub mod loader;
pub mod source;

pub use loader::load_snapshot;
pub use source::{CsvSource, HttpSource, RowRecord, TabularDataSource, XlsxSource};
