//! Parquet ingestion implementation.

use std::path::Path;

use parquet::basic::Type as PhysicalType;
use parquet::file::reader::{ChunkReader, FileReader};
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::Field;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{self, DataSet, DataType, Schema, Value};

/// Ingest a Parquet file into an in-memory `DataSet`.
///
/// Notes:
/// - The schema is taken from the file's leaf columns (by column path string), in file order
/// - Uses the Parquet record API (`RowIter`)
pub fn ingest_parquet_from_path(path: impl AsRef<Path>) -> IngestionResult<DataSet> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;
    let schema = parquet_schema(&reader);

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (idx0, row_res) in reader.into_iter().enumerate() {
        let row_num = idx0 + 1;
        let row = row_res?;

        let mut out_row: Vec<Value> = vec![Value::Null; schema.fields.len()];
        for (name, field) in row.get_column_iter() {
            let idx = schema.index_of(name).ok_or_else(|| IngestionError::SchemaMismatch {
                message: format!("row {row_num} has unexpected column '{name}'"),
            })?;
            out_row[idx] = convert_parquet_field(field);
        }
        rows.push(out_row);
    }

    Ok(DataSet::new(schema, rows))
}

fn parquet_schema<R: ChunkReader + 'static>(reader: &SerializedFileReader<R>) -> Schema {
    let cols = reader
        .metadata()
        .file_metadata()
        .schema_descr()
        .columns();
    let fields = cols
        .iter()
        .map(|c| {
            let data_type = match c.physical_type() {
                PhysicalType::BOOLEAN => DataType::Bool,
                PhysicalType::INT32 | PhysicalType::INT64 => DataType::Int64,
                PhysicalType::FLOAT | PhysicalType::DOUBLE => DataType::Float64,
                _ => DataType::Utf8,
            };
            types::Field::new(c.path().string(), data_type)
        })
        .collect();
    Schema::new(fields)
}

fn convert_parquet_field(f: &Field) -> Value {
    match f {
        Field::Null => Value::Null,
        Field::Bool(b) => Value::Bool(*b),
        Field::Byte(v) => Value::Int64(i64::from(*v)),
        Field::Short(v) => Value::Int64(i64::from(*v)),
        Field::Int(v) => Value::Int64(i64::from(*v)),
        Field::Long(v) => Value::Int64(*v),
        Field::UByte(v) => Value::Int64(i64::from(*v)),
        Field::UShort(v) => Value::Int64(i64::from(*v)),
        Field::UInt(v) => Value::Int64(i64::from(*v)),
        Field::ULong(v) => match i64::try_from(*v) {
            Ok(n) => Value::Int64(n),
            Err(_) => Value::Float64(*v as f64),
        },
        Field::Float(v) => Value::Float64(f64::from(*v)),
        Field::Double(v) => Value::Float64(*v),
        Field::Str(s) => Value::Utf8(s.clone()),
        other => Value::Utf8(other.to_string()),
    }
}
