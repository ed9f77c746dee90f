//! In-memory data transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by ingestion.
//! Every function is pure: it reads its input and returns a new dataset.
//!
//! - [`filter()`] / [`filter_contains()`]: row filtering by predicate or case-insensitive substring
//! - [`clean`]: non-finite/missing value cleanup
//! - [`group::distinct_keys`]: first-seen distinct values of a column
//! - [`sample`]: uniform sampling without replacement
//!
//! ## Example: clean → filter → sample
//!
//! ```rust
//! use exercise_query_service::processing::{clean, filter_contains, sample};
//! use exercise_query_service::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("Exercise Name", DataType::Utf8),
//!     Field::new("Target_Muscles", DataType::Utf8),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Utf8("Bench Press".into()), Value::Utf8("Chest, Triceps".into())],
//!         vec![Value::Utf8("Push Up".into()), Value::Utf8("Chest".into())],
//!         vec![Value::Utf8("Row".into()), Value::Null],
//!     ],
//! );
//!
//! let cleaned = clean::clean(&ds);
//! assert_eq!(cleaned.rows[2][1], Value::Utf8(String::new()));
//!
//! let chest = filter_contains(&cleaned, 1, "chest");
//! assert_eq!(chest.row_count(), 2);
//!
//! let picked = sample::sample_up_to(&chest, 1, &mut rand::thread_rng());
//! assert_eq!(picked.row_count(), 1);
//! ```

pub mod clean;
pub mod filter;
pub mod group;
pub mod sample;

pub use filter::{filter, filter_contains};
