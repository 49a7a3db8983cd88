//! JSON ingestion.
//!
//! Supported inputs:
//! - A JSON array: `[{"a":1}, {"a":2}]`
//! - A single JSON object: `{"a":1}` (one-record collection)
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Objects become [`Value::Record`]s, nested objects become nested records. Array elements that
//! are not objects are converted as-is; the processing stages treat them as non-records.

use tracing::debug;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{Collection, Value};

/// Parse JSON or NDJSON text into a [`Collection`].
pub fn records_from_json_str(input: &str) -> PipelineResult<Collection> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PipelineError::Ingestion {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => Ok(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(_) => Ok(vec![Value::from(v)]),
            _ => Err(PipelineError::Ingestion {
                message: "json must be an object, an array, or NDJSON".to_string(),
            }),
        }
    } else {
        debug!("input is not a single json value; trying ndjson");
        let mut out = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
                PipelineError::Ingestion {
                    message: format!("invalid ndjson at line {}: {}", i + 1, e),
                }
            })?;
            if !v.is_object() {
                return Err(PipelineError::Ingestion {
                    message: format!("ndjson line {} is not a json object", i + 1),
                });
            }
            out.push(Value::from(v));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::records_from_json_str;
    use crate::types::Value;

    #[test]
    fn array_of_objects() {
        let c = records_from_json_str(r#"[{"rating": 3}, {"rating": 4.5}]"#).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c[1].field("rating"), Some(&Value::Float64(4.5)));
    }

    #[test]
    fn single_object() {
        let c = records_from_json_str(r#"{"name": "Dhaba"}"#).unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].field("name"), Some(&Value::from("Dhaba")));
    }

    #[test]
    fn ndjson_lines() {
        let input = "{\"id\":1}\n\n{\"id\":2}\n";
        let c = records_from_json_str(input).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c[1].field("id"), Some(&Value::Int64(2)));
    }

    #[test]
    fn rejects_empty_and_scalar_input() {
        assert!(records_from_json_str("   ").is_err());
        let err = records_from_json_str("42").unwrap_err();
        assert!(err.to_string().contains("ingestion error"));
    }

    #[test]
    fn reports_bad_ndjson_line() {
        let err = records_from_json_str("{\"id\":1}\n{oops}\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
