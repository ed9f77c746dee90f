use std::fmt::{self, Write as _};
use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion functions and the table loader.
///
/// This is a single error enum shared across CSV/JSON/Parquet ingestion.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// The data file does not exist. Fatal at startup.
    #[error("data file not found at path: {}", path.display())]
    MissingDataFile { path: PathBuf },

    /// Underlying I/O error (e.g. permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON ingestion error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parquet ingestion error.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// The input does not have the expected shape (missing required columns, ragged rows, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },
}

/// Errors returned by table queries.
///
/// These are recovered locally: the HTTP layer renders them as an `{"error": ...}` payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The requested search column is not part of the table's schema.
    #[error("Invalid column name: {column}. Available columns: {}", ColumnList(available))]
    InvalidColumn {
        column: String,
        available: Vec<String>,
    },

    /// The requested muscle matched no rows.
    #[error("No exercises found for the muscle: {muscle}")]
    NoExercisesForMuscle { muscle: String },
}

/// Renders column names as a list literal: `['A', 'B']`.
///
/// Each name is single-quoted unless it contains a single quote and no double quote, in which
/// case it is double-quoted (`["Men's"]`). Backslashes, the chosen quote and control characters
/// are escaped.
struct ColumnList<'a>(&'a [String]);

impl fmt::Display for ColumnList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_quoted(f, name)?;
        }
        f.write_str("]")
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let quote = if name.contains('\'') && !name.contains('"') { '"' } else { '\'' };
    f.write_char(quote)?;
    for c in name.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{c}")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}
