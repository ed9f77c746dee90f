//! `exercise-query-service` serves read-only queries over an exercise dataset loaded once into an
//! in-memory [`types::DataSet`].
//!
//! The dataset is read at startup with [`table::ExerciseTable::load`], which dispatches on the file
//! extension (CSV, JSON/NDJSON, Parquet), infers the schema from the file and replaces every
//! missing or non-finite value with the empty-string sentinel.
//!
//! ## Queries
//!
//! - [`table::ExerciseTable::search`]: case-insensitive substring search on a named column
//! - [`table::ExerciseTable::sample_six`]: up to six random exercises per muscle group
//! - [`table::ExerciseTable::sample_one`]: one random exercise per muscle group
//!
//! Muscle groups are keyed by the distinct literal values of the `Target_Muscles` column; a group's
//! rows are every row whose `Target_Muscles` contains the key, so `"Chest"` also collects
//! `"Chest, Triceps"` rows.
//!
//! ```rust
//! use exercise_query_service::table::{ExerciseTable, SearchOutcome};
//! use exercise_query_service::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(vec![
//!         Field::new("Exercise Name", DataType::Utf8),
//!         Field::new("Target_Muscles", DataType::Utf8),
//!     ]),
//!     vec![
//!         vec![Value::Utf8("Bench Press".into()), Value::Utf8("Chest, Triceps".into())],
//!         vec![Value::Utf8("Squat".into()), Value::Utf8("Quadriceps".into())],
//!     ],
//! );
//! let table = ExerciseTable::from_dataset(ds).unwrap();
//!
//! assert!(matches!(table.search("Exercise Name", "PRESS"), Ok(SearchOutcome::Matches(_))));
//! let groups = table.sample_one(None, &mut rand::thread_rng()).unwrap();
//! assert_eq!(groups.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: format-specific loaders and the unified entrypoint
//! - [`types`]: schema + in-memory dataset types
//! - [`processing`]: pure dataset transformations (filter/clean/group/sample)
//! - [`table`]: the exercise table and its queries
//! - [`api`]: axum router
//! - [`config`]: command-line / environment configuration
//! - [`error`]: error types

pub mod api;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod table;
pub mod types;

pub use error::{IngestionError, IngestionResult, QueryError};
