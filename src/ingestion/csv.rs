//! CSV ingestion implementation.

use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Cell contents treated as a missing value, whatever the column type.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Ingest a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers; they give the column order.
/// - Every record must have exactly one cell per header.
/// - Column types are inferred from the non-missing cells (see [`infer_column_type`]).
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> IngestionResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> IngestionResult<DataSet> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();

    // Raw cells first; types need a full column scan before any cell can be converted.
    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;
        if record.len() != headers.len() {
            return Err(IngestionError::SchemaMismatch {
                message: format!(
                    "row {user_row} has {} cells, expected {}",
                    record.len(),
                    headers.len()
                ),
            });
        }
        raw_rows.push(record.iter().map(normalize_cell).collect());
    }

    let fields: Vec<Field> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let column = raw_rows.iter().filter_map(|row| row[idx].as_deref());
            Field::new(name.clone(), infer_column_type(column))
        })
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&fields)
                .map(|(cell, field)| match cell {
                    Some(raw) => convert_cell(field.data_type, raw),
                    None => Value::Null,
                })
                .collect()
        })
        .collect();

    Ok(DataSet::new(Schema::new(fields), rows))
}

/// Infer the narrowest type that every cell of a column parses as.
///
/// Order of preference: `Bool`, `Int64`, `Float64`, falling back to `Utf8`. A column with no
/// non-missing cells is `Float64`, since it can only ever hold missing values.
pub fn infer_column_type<'a>(cells: impl Iterator<Item = &'a str> + Clone) -> DataType {
    if cells.clone().all(|c| parse_bool(c).is_some()) && cells.clone().next().is_some() {
        DataType::Bool
    } else if cells.clone().all(|c| c.trim().parse::<i64>().is_ok()) && cells.clone().next().is_some() {
        DataType::Int64
    } else if cells.clone().all(|c| c.trim().parse::<f64>().is_ok()) {
        DataType::Float64
    } else {
        DataType::Utf8
    }
}

/// Cells are kept exactly as written; only an exact missing marker becomes `None`.
fn normalize_cell(raw: &str) -> Option<String> {
    if MISSING_MARKERS.contains(&raw) {
        None
    } else {
        Some(raw.to_owned())
    }
}

/// Numbers and booleans tolerate surrounding spaces; text is stored untouched.
fn convert_cell(data_type: DataType, raw: String) -> Value {
    // Inference guarantees the parse succeeds; fall back to text rather than drop data.
    let parsed = match data_type {
        DataType::Bool => parse_bool(&raw).map(Value::Bool),
        DataType::Int64 => raw.trim().parse::<i64>().ok().map(Value::Int64),
        DataType::Float64 => raw.trim().parse::<f64>().ok().map(Value::Float64),
        DataType::Utf8 => None,
    };
    parsed.unwrap_or(Value::Utf8(raw))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_types_from_non_missing_cells() {
        assert_eq!(infer_column_type(["1", "2"].into_iter()), DataType::Int64);
        assert_eq!(infer_column_type(["1", "2.5"].into_iter()), DataType::Float64);
        assert_eq!(infer_column_type(["inf", "-inf", "3"].into_iter()), DataType::Float64);
        assert_eq!(infer_column_type(["True", "false"].into_iter()), DataType::Bool);
        assert_eq!(infer_column_type(["Chest", "1"].into_iter()), DataType::Utf8);
        assert_eq!(infer_column_type(std::iter::empty()), DataType::Float64);
    }

    #[test]
    fn missing_markers_become_null() {
        assert_eq!(normalize_cell("NaN"), None);
        assert_eq!(normalize_cell(""), None);
        assert_eq!(normalize_cell(" NA "), Some(" NA ".to_string()));
        assert_eq!(normalize_cell(" Chest "), Some(" Chest ".to_string()));
    }
}
