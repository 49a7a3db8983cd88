//! `record-pipeline` is a small in-memory toolkit for building predicate, comparator and
//! projection functions from declarative descriptors, and chaining them into ordered
//! processing pipelines over collections of records.
//!
//! Records are open, schema-less maps ([`types::Record`]) of heterogeneous [`types::Value`]s.
//! A collection is an ordered `Vec<Value>` ([`types::Collection`]).
//!
//! ## Building blocks
//!
//! - [`processing::make_predicate`]: `record[field] <op> value`, with `>`, `<`, `>=`, `<=`, `===`.
//!   Any other operator builds a predicate that is always `false`.
//! - [`processing::make_comparator`]: ordering on one field, ascending or descending.
//! - [`processing::make_projector`]: keep only selected fields.
//! - [`pipeline::run_pipeline`] / [`pipeline::Pipeline`]: fold stages left to right.
//!
//! Every one of these is total. Malformed input produces `false`, a trailing sort position, an
//! empty record or an empty collection rather than an error. Only [`ingestion`] and
//! [`descriptor`] parsing can fail, with [`PipelineError`].
//!
//! ## Example: filter, sort, project
//!
//! ```rust
//! use record_pipeline::pipeline::{filter, map, run_pipeline, sort};
//! use record_pipeline::processing::{make_comparator, make_predicate, make_projector};
//! use record_pipeline::ingestion::records_from_json_str;
//! use record_pipeline::types::{Record, Value};
//!
//! # fn main() -> Result<(), record_pipeline::PipelineError> {
//! let dhabas = records_from_json_str(
//!     r#"[
//!         {"name": "Punjab Dhaba", "rating": 4.5, "city": "Karnal"},
//!         {"name": "Roadside Stop", "rating": 3.1, "city": "Panipat"},
//!         {"name": "Haveli", "rating": 4.8, "city": "Murthal"}
//!     ]"#,
//! )?;
//!
//! let out = run_pipeline(
//!     &Value::List(dhabas),
//!     &[
//!         &filter(make_predicate("rating", ">=", 4)),
//!         &sort(make_comparator("rating", "desc")),
//!         &map(make_projector(["name"])),
//!     ],
//! );
//!
//! assert_eq!(
//!     out,
//!     vec![
//!         Value::Record(Record::new().with("name", "Haveli")),
//!         Value::Record(Record::new().with("name", "Punjab Dhaba")),
//!     ]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: values, records, collections
//! - [`processing`]: the predicate/comparator/projection factories
//! - [`pipeline`]: the stage trait, adapters, runner and observer hooks
//! - [`descriptor`]: serde descriptors for configuring pipelines from JSON
//! - [`ingestion`]: JSON / NDJSON / CSV text into collections
//! - [`error`]: error type for the fallible parsing entrypoints
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: stage boundaries at `debug`/`trace`, and degradations
//! (rejected input, unknown operators or stage kinds in descriptors) at `warn`. It never installs
//! a subscriber.

pub mod descriptor;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod types;

pub use error::{PipelineError, PipelineResult};
