//! Predicate factory.
//!
//! [`make_predicate`] captures a field name, an [`Operator`] and a reference value and returns a
//! reusable [`Predicate`]. The operator is validated lazily: an unrecognized symbol does not
//! fail construction, it produces a predicate that is `false` for every input.

use std::fmt;

use tracing::trace;

use crate::types::{Record, Value};

/// Comparison operator used by a [`Predicate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `===` (strict equality, see [`Value::strict_eq`]).
    StrictEq,
    /// Any other symbol. Predicates built with it never match.
    Unknown(String),
}

impl Operator {
    /// Parse an operator symbol. Never fails; unrecognized symbols become [`Operator::Unknown`].
    pub fn parse(symbol: &str) -> Self {
        match symbol {
            ">" => Self::Gt,
            "<" => Self::Lt,
            ">=" => Self::Ge,
            "<=" => Self::Le,
            "===" => Self::StrictEq,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The operator's symbol.
    pub fn symbol(&self) -> &str {
        match self {
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::StrictEq => "===",
            Self::Unknown(s) => s,
        }
    }

    /// Returns `true` unless this is [`Operator::Unknown`].
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    fn apply(&self, lhs: Option<&Value>, rhs: &Value) -> bool {
        // A missing field compares like an incomparable value: every ordering test is false.
        let Some(lhs) = lhs else {
            return false;
        };
        match self {
            Self::Gt => lhs.native_cmp(rhs).is_some_and(|o| o.is_gt()),
            Self::Lt => lhs.native_cmp(rhs).is_some_and(|o| o.is_lt()),
            Self::Ge => lhs.native_cmp(rhs).is_some_and(|o| o.is_ge()),
            Self::Le => lhs.native_cmp(rhs).is_some_and(|o| o.is_le()),
            Self::StrictEq => lhs.strict_eq(rhs),
            Self::Unknown(_) => false,
        }
    }
}

impl From<&str> for Operator {
    fn from(symbol: &str) -> Self {
        Self::parse(symbol)
    }
}

impl From<String> for Operator {
    fn from(symbol: String) -> Self {
        Self::parse(&symbol)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A reusable boolean test over a candidate value.
///
/// Stateless: it only holds its construction arguments, so it can be cloned and shared freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    field: String,
    operator: Operator,
    value: Value,
}

/// Build a [`Predicate`] testing `candidate[field] <operator> value`.
///
/// Construction never fails. See [`Predicate::test`] for the evaluation rules.
pub fn make_predicate(
    field: impl Into<String>,
    operator: impl Into<Operator>,
    value: impl Into<Value>,
) -> Predicate {
    Predicate {
        field: field.into(),
        operator: operator.into(),
        value: value.into(),
    }
}

impl Predicate {
    /// Field tested by this predicate.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    /// Reference value on the right-hand side.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Evaluate the predicate against any value.
    ///
    /// - Non-record candidates (null, primitives, lists) yield `false`.
    /// - An [`Operator::Unknown`] yields `false` for every candidate.
    /// - A missing field yields `false` for every operator.
    pub fn test(&self, candidate: &Value) -> bool {
        match candidate {
            Value::Record(record) => self.test_record(record),
            _ => {
                trace!(field = %self.field, "predicate candidate is not a record");
                false
            }
        }
    }

    /// Evaluate the predicate against a record.
    pub fn test_record(&self, record: &Record) -> bool {
        self.operator.apply(record.get(&self.field), &self.value)
    }

    /// Convert into a plain closure, e.g. for `Iterator::filter`.
    pub fn into_fn(self) -> impl Fn(&Value) -> bool + Clone + Send + Sync {
        move |candidate| self.test(candidate)
    }
}
