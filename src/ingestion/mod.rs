//! Turning in-memory text into record collections.
//!
//! Ingestion is the only producer of records in this crate; the processing stages never read
//! or write anything outside memory. Both entrypoints work on strings (or, for CSV, an existing
//! reader):
//!
//! - [`json`]: JSON arrays, single objects and NDJSON
//! - [`csv`]: CSV with a header row, cell types inferred

pub mod csv;
pub mod json;

pub use self::csv::{records_from_csv_reader, records_from_csv_str};
pub use self::json::records_from_json_str;
