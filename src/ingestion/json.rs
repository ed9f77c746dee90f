//! JSON ingestion implementation.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Column order comes from the keys of the first object. Nested arrays/objects are kept as their
//! JSON text.

use std::fs;
use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Ingest JSON into an in-memory `DataSet`.
pub fn ingest_json_from_path(path: impl AsRef<Path>) -> IngestionResult<DataSet> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text)
}

/// Ingest JSON from an in-memory string into a [`DataSet`].
pub fn ingest_json_from_str(input: &str) -> IngestionResult<DataSet> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => ingest_json_values(&items),
            serde_json::Value::Object(_) => ingest_json_values(&[v]),
            _ => Err(IngestionError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        }
    } else {
        // Fall back to NDJSON.
        let mut values = Vec::new();
        for line in trimmed.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            values.push(serde_json::from_str::<serde_json::Value>(line)?);
        }
        ingest_json_values(&values)
    }
}

fn ingest_json_values(values: &[serde_json::Value]) -> IngestionResult<DataSet> {
    let names: Vec<String> = match values.first() {
        Some(first) => object_of(first, 1)?.keys().cloned().collect(),
        None => Vec::new(),
    };

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(values.len());
    for (idx0, v) in values.iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = object_of(v, row_num)?;

        let mut row: Vec<Value> = Vec::with_capacity(names.len());
        for name in &names {
            let jv = obj.get(name).ok_or_else(|| IngestionError::SchemaMismatch {
                message: format!("row {row_num} missing required field '{name}'"),
            })?;
            row.push(convert_json_value(jv));
        }
        rows.push(row);
    }

    let fields = names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let data_type = column_type(rows.iter().map(|r| &r[idx]));
            Field::new(name, data_type)
        })
        .collect();

    Ok(DataSet::new(Schema::new(fields), rows))
}

fn object_of(
    v: &serde_json::Value,
    row_num: usize,
) -> IngestionResult<&serde_json::Map<String, serde_json::Value>> {
    v.as_object().ok_or_else(|| IngestionError::SchemaMismatch {
        message: format!("row {row_num} is not a json object"),
    })
}

fn convert_json_value(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int64(i),
            None => n.as_f64().map(Value::Float64).unwrap_or(Value::Null),
        },
        serde_json::Value::String(s) => Value::Utf8(s.clone()),
        nested => Value::Utf8(nested.to_string()),
    }
}

/// Type of a column from its converted cells: a single non-null variant gives that type, ints
/// mixed with floats give `Float64`, anything else is `Utf8`.
fn column_type<'a>(cells: impl Iterator<Item = &'a Value>) -> DataType {
    let mut seen: Option<DataType> = None;
    for cell in cells {
        let t = match cell {
            Value::Null => continue,
            Value::Int64(_) => DataType::Int64,
            Value::Float64(_) => DataType::Float64,
            Value::Bool(_) => DataType::Bool,
            Value::Utf8(_) => DataType::Utf8,
        };
        seen = Some(match (seen, t) {
            (None, t) => t,
            (Some(a), b) if a == b => a,
            (Some(DataType::Int64), DataType::Float64) | (Some(DataType::Float64), DataType::Int64) => {
                DataType::Float64
            }
            _ => return DataType::Utf8,
        });
    }
    seen.unwrap_or(DataType::Float64)
}
