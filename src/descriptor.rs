//! Declarative descriptors for predicates, comparators, projections and whole pipelines.
//!
//! Descriptors are plain serde types, so a pipeline can be configured from JSON:
//!
//! ```rust
//! use record_pipeline::descriptor::PipelineDescriptor;
//! use record_pipeline::types::{Record, Value};
//!
//! # fn main() -> Result<(), record_pipeline::PipelineError> {
//! let pipeline = PipelineDescriptor::from_json_str(
//!     r#"{"stages": [
//!         {"stage": "filter", "field": "rating", "op": ">=", "value": 4},
//!         {"stage": "sort", "field": "rating", "direction": "desc"},
//!         {"stage": "project", "fields": ["name"]}
//!     ]}"#,
//! )?
//! .build();
//!
//! let data = Value::List(vec![
//!     Value::Record(Record::new().with("name", "Punjab Dhaba").with("rating", 4.5)),
//!     Value::Record(Record::new().with("name", "Roadside Stop").with("rating", 3.0)),
//! ]);
//! let out = pipeline.run(&data);
//! assert_eq!(out, vec![Value::Record(Record::new().with("name", "Punjab Dhaba"))]);
//! # Ok(())
//! # }
//! ```
//!
//! Descriptors degrade the same way the factories do: an unrecognized operator builds an
//! always-false predicate, a non-array `fields` builds a projector of empty records, and an
//! unrecognized `stage` kind builds a slot the runner skips.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::{Pipeline, Stage, filter, map, sort};
use crate::processing::{
    Comparator, Direction, Operator, Predicate, Projector, make_comparator, make_predicate,
};
use crate::types::Value;

/// Describes a [`Predicate`].
///
/// `op` is kept as raw JSON; anything other than one of the five operator strings builds an
/// always-false predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredicateDescriptor {
    pub field: String,
    pub op: serde_json::Value,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl PredicateDescriptor {
    pub fn build(&self) -> Predicate {
        let operator = match self.op.as_str() {
            Some(symbol) => Operator::parse(symbol),
            None => Operator::Unknown(self.op.to_string()),
        };
        if !operator.is_known() {
            warn!(field = %self.field, op = %operator, "unknown operator; predicate never matches");
        }
        make_predicate(self.field.clone(), operator, Value::from(self.value.clone()))
    }
}

/// Describes a [`Comparator`]. `direction` defaults to ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparatorDescriptor {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

impl ComparatorDescriptor {
    pub fn build(&self) -> Comparator {
        let direction = self
            .direction
            .as_deref()
            .map(Direction::parse)
            .unwrap_or_default();
        make_comparator(self.field.clone(), direction)
    }
}

/// Describes a [`Projector`]. `fields` is raw JSON so a non-array degrades to empty records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionDescriptor {
    pub fields: serde_json::Value,
}

impl ProjectionDescriptor {
    pub fn build(&self) -> Projector {
        Projector::from_value(&Value::from(self.fields.clone()))
    }
}

/// One pipeline stage, tagged by `"stage"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "lowercase")]
pub enum StageDescriptor {
    Filter(PredicateDescriptor),
    Sort(ComparatorDescriptor),
    #[serde(alias = "map")]
    Project(ProjectionDescriptor),
    /// Any other stage kind. Builds no stage.
    #[serde(other)]
    Unsupported,
}

impl StageDescriptor {
    /// Build the stage, or `None` for [`StageDescriptor::Unsupported`].
    pub fn build(&self) -> Option<Box<dyn Stage>> {
        match self {
            Self::Filter(d) => Some(Box::new(filter(d.build()))),
            Self::Sort(d) => Some(Box::new(sort(d.build()))),
            Self::Project(d) => Some(Box::new(map(d.build()))),
            Self::Unsupported => None,
        }
    }
}

/// An ordered list of stage descriptors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineDescriptor {
    #[serde(default)]
    pub stages: Vec<StageDescriptor>,
}

impl PipelineDescriptor {
    /// Parse a descriptor document.
    ///
    /// Malformed JSON is [`PipelineError::Json`]; well-formed JSON of the wrong shape (e.g. a
    /// stage without a `"stage"` tag, or a filter without `field`) is
    /// [`PipelineError::Descriptor`].
    pub fn from_json_str(input: &str) -> PipelineResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            if e.is_syntax() || e.is_eof() || e.is_io() {
                PipelineError::Json(e)
            } else {
                PipelineError::Descriptor {
                    message: e.to_string(),
                }
            }
        })
    }

    /// Build a [`Pipeline`]. Unsupported stages become skipped slots, keeping stage indexes
    /// aligned with the descriptor.
    pub fn build(&self) -> Pipeline {
        let mut pipeline = Pipeline::new();
        for (index, stage) in self.stages.iter().enumerate() {
            match stage.build() {
                Some(s) => pipeline.push(s),
                None => {
                    warn!(index, "unsupported stage kind; it will be skipped");
                    pipeline = pipeline.skip();
                }
            }
        }
        pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ComparatorDescriptor, PipelineDescriptor, PredicateDescriptor, ProjectionDescriptor,
        StageDescriptor,
    };
    use crate::PipelineError;
    use crate::processing::Direction;
    use crate::types::{Record, Value};

    #[test]
    fn parses_each_stage_kind() {
        let d = PipelineDescriptor::from_json_str(
            r#"{"stages": [
                {"stage": "filter", "field": "rating", "op": ">", "value": 3},
                {"stage": "sort", "field": "name"},
                {"stage": "map", "fields": ["name"]},
                {"stage": "reduce", "field": "rating"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(d.stages.len(), 4);
        assert!(matches!(d.stages[0], StageDescriptor::Filter(_)));
        assert_eq!(
            d.stages[1],
            StageDescriptor::Sort(ComparatorDescriptor {
                field: "name".to_string(),
                direction: None,
            })
        );
        assert!(matches!(d.stages[2], StageDescriptor::Project(_)));
        assert_eq!(d.stages[3], StageDescriptor::Unsupported);
    }

    #[test]
    fn unsupported_stage_is_kept_as_skipped_slot() {
        let d = PipelineDescriptor::from_json_str(
            r#"{"stages": [{"stage": "explode"}, {"stage": "sort", "field": "rating", "direction": "desc"}]}"#,
        )
        .unwrap();
        let pipeline = d.build();
        assert_eq!(pipeline.len(), 2);

        let data = Value::List(vec![
            Value::Record(Record::new().with("rating", 1)),
            Value::Record(Record::new().with("rating", 2)),
        ]);
        let out = pipeline.run(&data);
        assert_eq!(out[0].field("rating"), Some(&Value::Int64(2)));
    }

    #[test]
    fn non_string_operator_builds_always_false_predicate() {
        let d = PredicateDescriptor {
            field: "rating".to_string(),
            op: serde_json::json!(5),
            value: serde_json::json!(1),
        };
        let p = d.build();
        assert!(!p.operator().is_known());
        assert!(!p.test(&Value::Record(Record::new().with("rating", 5))));
    }

    #[test]
    fn comparator_direction_defaults_to_ascending() {
        let d = ComparatorDescriptor {
            field: "rating".to_string(),
            direction: None,
        };
        assert_eq!(d.build().direction(), Direction::Ascending);
    }

    #[test]
    fn non_array_fields_project_to_empty_records() {
        let d = ProjectionDescriptor {
            fields: serde_json::json!("name"),
        };
        let rec = Value::Record(Record::new().with("name", "Dhaba"));
        assert!(d.build().project(&rec).is_empty());
    }

    #[test]
    fn missing_stage_tag_is_a_descriptor_error() {
        let err = PipelineDescriptor::from_json_str(r#"{"stages": [{"field": "x"}]}"#).unwrap_err();
        assert!(matches!(err, PipelineError::Descriptor { .. }));
        assert!(err.to_string().contains("invalid descriptor"));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = PipelineDescriptor::from_json_str(r#"{"stages": ["#).unwrap_err();
        assert!(matches!(err, PipelineError::Json(_)));
    }

    #[test]
    fn descriptors_round_trip_through_json() {
        let d = PipelineDescriptor {
            stages: vec![StageDescriptor::Sort(ComparatorDescriptor {
                field: "rating".to_string(),
                direction: Some("desc".to_string()),
            })],
        };
        let text = serde_json::to_string(&d).unwrap();
        assert!(text.contains(r#""stage":"sort""#));
        assert_eq!(PipelineDescriptor::from_json_str(&text).unwrap(), d);
    }
}
