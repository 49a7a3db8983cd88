//! Factories for the functions a pipeline is assembled from.
//!
//! Each factory captures its configuration and returns a stateless, reusable value:
//!
//! - [`make_predicate()`]: boolean test `record[field] <op> value`
//! - [`make_comparator()`]: field-keyed ordering, usable with `sort_by`
//! - [`make_projector()`]: reduced-shape record holding only selected fields
//!
//! None of them can fail. Malformed input degrades to a well-typed default instead: `false`
//! for predicates, a place after every orderable value for comparators, an empty record for
//! projectors.
//!
//! ## Example: filter, sort, project by hand
//!
//! ```rust
//! use record_pipeline::processing::{make_comparator, make_predicate, make_projector};
//! use record_pipeline::types::{Record, Value};
//!
//! let dhabas = vec![
//!     Value::Record(Record::new().with("name", "Punjab Dhaba").with("rating", 4.5)),
//!     Value::Record(Record::new().with("name", "Roadside Stop").with("rating", 3.2)),
//!     Value::Record(Record::new().with("name", "Haveli").with("rating", 4.8)),
//! ];
//!
//! let high_rated = make_predicate("rating", ">=", 4);
//! let by_rating = make_comparator("rating", "desc");
//! let names = make_projector(["name"]);
//!
//! let mut picked: Vec<&Value> = dhabas.iter().filter(|d| high_rated.test(d)).collect();
//! picked.sort_by(|a, b| by_rating.compare(a, b));
//! let out: Vec<Record> = picked.into_iter().map(|d| names.project(d)).collect();
//!
//! assert_eq!(out[0], Record::new().with("name", "Haveli"));
//! assert_eq!(out[1], Record::new().with("name", "Punjab Dhaba"));
//! ```

pub mod comparator;
pub mod predicate;
pub mod projection;

pub use comparator::{Comparator, Direction, make_ascending, make_comparator};
pub use predicate::{Operator, Predicate, make_predicate};
pub use projection::{Projector, make_projector};
