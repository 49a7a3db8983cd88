//! CSV ingestion.

use crate::error::PipelineResult;
use crate::types::{Collection, Record, Value};

/// Parse CSV text (with a header row) into a [`Collection`] of records.
pub fn records_from_csv_str(input: &str) -> PipelineResult<Collection> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());
    records_from_csv_reader(&mut rdr)
}

/// Read records from an existing CSV reader.
///
/// Rules:
///
/// - The reader must have headers; header names become field names.
/// - Each cell's type is inferred: `Int64`, then `Float64`, then `Bool` (`true`/`false`, any
///   case), otherwise `Utf8`.
/// - Empty cells become [`Value::Null`]; cells missing from a short row are left out of the
///   record.
pub fn records_from_csv_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> PipelineResult<Collection> {
    let headers = rdr.headers()?.clone();

    let mut out = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(name, raw)| (name, infer_value(raw)))
            .collect();
        out.push(Value::Record(record));
    }
    Ok(out)
}

fn infer_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int64(i);
    }
    // "NaN" and "inf" parse as floats but are text cells here
    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            return Value::Float64(f);
        }
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::Utf8(trimmed.to_owned())
}
