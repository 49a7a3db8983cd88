//! Projection factory.

use crate::types::{Record, Value};

/// Derives a reduced record holding only selected fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projector {
    // `None` when the field descriptor was not a sequence; projects everything to `{}`.
    fields: Option<Vec<String>>,
}

/// Build a [`Projector`] keeping `fields`.
pub fn make_projector<I, S>(fields: I) -> Projector
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Projector {
        fields: Some(fields.into_iter().map(Into::into).collect()),
    }
}

impl Projector {
    /// Build a projector from a dynamic field descriptor.
    ///
    /// A [`Value::List`] supplies the field names. Numbers and booleans select the field named
    /// by their text form (`7` selects `"7"`); `Null` and structured entries are ignored. Any
    /// other value is not a sequence, and the resulting projector returns an empty record for
    /// every input.
    pub fn from_value(descriptor: &Value) -> Self {
        match descriptor {
            Value::List(items) => Self {
                fields: Some(items.iter().filter_map(field_name).collect()),
            },
            _ => {
                tracing::debug!("projection descriptor is not a list; projecting to empty records");
                Self { fields: None }
            }
        }
    }

    /// Selected field names, or `None` for a projector built from a non-sequence descriptor.
    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    /// Project `input` to a new record.
    ///
    /// Fields absent from the input are skipped. Values are cloned, the input is never modified,
    /// and a non-record input yields an empty record.
    pub fn project(&self, input: &Value) -> Record {
        match input {
            Value::Record(record) => self.project_record(record),
            _ => Record::new(),
        }
    }

    /// Project a typed record.
    pub fn project_record(&self, record: &Record) -> Record {
        let Some(fields) = &self.fields else {
            return Record::new();
        };
        fields
            .iter()
            .filter_map(|name| record.get(name).map(|v| (name.clone(), v.clone())))
            .collect()
    }

    /// Project an owned `input`, moving the selected values instead of cloning them.
    pub fn project_owned(&self, input: Value) -> Record {
        let (Some(fields), Value::Record(mut record)) = (&self.fields, input) else {
            return Record::new();
        };
        fields
            .iter()
            .filter_map(|name| record.remove(name).map(|v| (name.clone(), v)))
            .collect()
    }

    /// Convert into a plain closure producing [`Value::Record`]s.
    pub fn into_fn(self) -> impl Fn(&Value) -> Value + Clone + Send + Sync {
        move |input| Value::Record(self.project(input))
    }
}

fn field_name(entry: &Value) -> Option<String> {
    match entry {
        Value::Utf8(s) => Some(s.clone()),
        Value::Int64(i) => Some(i.to_string()),
        Value::Float64(f) => Some(f.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
