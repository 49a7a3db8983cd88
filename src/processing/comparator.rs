//! Comparator factory.
//!
//! [`make_comparator`] returns a two-argument ordering over records keyed on one field. It plugs
//! straight into `slice::sort_by`:
//!
//! ```rust
//! use record_pipeline::processing::{make_comparator, Direction};
//! use record_pipeline::types::{Record, Value};
//!
//! let mut rows = vec![
//!     Value::Record(Record::new().with("rating", 3)),
//!     Value::Record(Record::new().with("rating", 5)),
//! ];
//! let by_rating = make_comparator("rating", Direction::Descending);
//! rows.sort_by(|a, b| by_rating.compare(a, b));
//! assert_eq!(rows[0].field("rating"), Some(&Value::Int64(5)));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::types::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Parse a direction token.
    ///
    /// `asc`/`ascending` (any case) are ascending. Every other token is descending.
    pub fn parse(token: &str) -> Self {
        if token.eq_ignore_ascii_case("asc") || token.eq_ignore_ascii_case("ascending") {
            Self::Ascending
        } else {
            Self::Descending
        }
    }
}

impl From<&str> for Direction {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("asc"),
            Self::Descending => f.write_str("desc"),
        }
    }
}

/// Field-keyed ordering between two values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    field: String,
    direction: Direction,
}

/// Build a [`Comparator`] ordering by `field` in `direction`.
pub fn make_comparator(field: impl Into<String>, direction: impl Into<Direction>) -> Comparator {
    Comparator {
        field: field.into(),
        direction: direction.into(),
    }
}

/// Build an ascending [`Comparator`] on `field`.
pub fn make_ascending(field: impl Into<String>) -> Comparator {
    make_comparator(field, Direction::default())
}

static MISSING: Value = Value::Null;

impl Comparator {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Compare `a[field]` with `b[field]`.
    ///
    /// Present values are ordered with [`Value::sort_cmp`]. A missing field or a non-record
    /// operand counts as [`Value::Null`], so it ranks with the other unorderable values after
    /// every number, string and boolean. This is a total order, which `sort_by` requires, and
    /// [`Ordering::Equal`] is only returned for genuine ties. Descending reverses the whole
    /// order, so unorderable values come first.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let x = a.field(&self.field).unwrap_or(&MISSING);
        let y = b.field(&self.field).unwrap_or(&MISSING);
        let ord = x.sort_cmp(y);
        match self.direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }

    /// [`Self::compare`] as `-1`, `0` or `1`.
    pub fn compare_i8(&self, a: &Value, b: &Value) -> i8 {
        self.compare(a, b) as i8
    }

    /// Convert into a plain closure for `sort_by`.
    pub fn into_fn(self) -> impl Fn(&Value, &Value) -> Ordering + Clone + Send + Sync {
        move |a, b| self.compare(a, b)
    }
}
