//! Core data model types.
//!
//! Everything in this crate operates on a [`Collection`] of [`Value`]s, where each item is
//! normally a [`Value::Record`]. A [`Record`] is an open mapping from field name to a
//! heterogeneous [`Value`]; there is no fixed schema and fields are looked up by name at runtime.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map;

/// An ordered sequence of values, normally records.
///
/// Order is significant and is preserved by every stage except sorts and filters.
pub type Collection = Vec<Value>;

/// A single heterogeneous value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Nested record.
    Record(Record),
}

impl Value {
    /// Returns `true` for [`Value::Record`] and [`Value::List`].
    pub fn is_structured(&self) -> bool {
        matches!(self, Value::Record(_) | Value::List(_))
    }

    /// Returns the inner record, if this value is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the inner list, if this value is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the inner string, if this value is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up `name` when this value is a record.
    ///
    /// Returns `None` for a missing field and for every non-record value.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_record().and_then(|r| r.get(name))
    }

    /// Native ordering between two values.
    ///
    /// - numbers compare numerically (`Int64` and `Float64` mix freely)
    /// - strings compare lexically (byte order)
    /// - booleans compare `false < true`
    ///
    /// Every other pairing is incomparable and returns `None`. That includes `Null`, `NaN`,
    /// mixed kinds (e.g. string vs number) and structured values.
    ///
    /// `Int64` against `Float64` is exact: no integer is rounded to the nearest double first.
    pub fn native_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int64(a), Value::Int64(b)) => Some(a.cmp(b)),
            (Value::Int64(a), Value::Float64(b)) => cmp_int_float(*a, *b),
            (Value::Float64(a), Value::Int64(b)) => cmp_int_float(*b, *a).map(Ordering::reverse),
            (Value::Float64(a), Value::Float64(b)) => a.partial_cmp(b),
            (Value::Utf8(a), Value::Utf8(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Total ordering used for sorting.
    ///
    /// Values are grouped by kind and the groups are ordered numbers, strings, booleans, then
    /// everything without a native order (`Null`, `NaN`, lists and records). Inside the first
    /// three groups this agrees with [`Value::native_cmp`]. Members of the last group are all
    /// equal to each other, so a stable sort keeps them in input order.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        self.sort_rank()
            .cmp(&other.sort_rank())
            .then_with(|| self.native_cmp(other).unwrap_or(Ordering::Equal))
    }

    fn sort_rank(&self) -> u8 {
        match self {
            Value::Int64(_) => 0,
            Value::Float64(f) if !f.is_nan() => 0,
            Value::Utf8(_) => 1,
            Value::Bool(_) => 2,
            _ => 3,
        }
    }

    /// Strict equality: same kind and same value, without coercion.
    ///
    /// `Int64` and `Float64` are both numbers, so `Int64(4)` equals `Float64(4.0)`; a string
    /// never equals a number. `NaN` is not equal to anything, itself included.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int64(_) | Value::Float64(_), Value::Int64(_) | Value::Float64(_)) => {
                self.native_cmp(other) == Some(Ordering::Equal)
            }
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Utf8(a), Value::Utf8(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_eq(y))
            }
            (Value::Record(a), Value::Record(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|w| v.strict_eq(w)))
            }
            _ => false,
        }
    }
}

// 2^63 as a double; every double at or above it is larger than any i64.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Compare an integer with a double without widening the integer.
fn cmp_int_float(i: i64, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    let whole = f.trunc();
    if whole >= I64_UPPER {
        return Some(Ordering::Less);
    }
    if whole < -I64_UPPER {
        return Some(Ordering::Greater);
    }
    // `whole` is integral and in range, so the cast is exact.
    let ord = i.cmp(&(whole as i64)).then_with(|| {
        let frac = f - whole;
        if frac > 0.0 {
            Ordering::Less
        } else if frac < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    });
    Some(ord)
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int64(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Utf8(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Utf8(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int64(i),
                // u64 beyond i64::MAX and all non-integers land here
                None => n.as_f64().map(Value::Float64).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Utf8(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Record(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// An open mapping from field name to [`Value`].
///
/// Field order is not significant; iteration is in field-name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Insert a field, returning the previous value if the field was present.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Remove `field`, returning its value if it was present.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Returns the value of `field`, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if `field` is present (even when its value is [`Value::Null`]).
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(field, value)` pairs.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    /// Iterate field names.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Wrap records into a [`Collection`].
pub fn collection<I>(records: I) -> Collection
where
    I: IntoIterator<Item = Record>,
{
    records.into_iter().map(Value::Record).collect()
}
