//! The exercise table and its read-only queries.
//!
//! An [`ExerciseTable`] is built once at startup and never mutated. Queries borrow it immutably,
//! so one instance can be shared behind an `Arc` by any number of request handlers.

use std::path::Path;

use rand::Rng;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{IngestionError, IngestionResult, QueryError};
use crate::ingestion::{ingest_from_path, IngestionOptions};
use crate::processing::{clean, filter_contains, group, sample};
use crate::types::DataSet;

/// Column holding the (possibly comma-separated) target muscles of an exercise.
pub const TARGET_MUSCLES_COLUMN: &str = "Target_Muscles";

/// Upper bound on the rows returned per group by [`ExerciseTable::sample_six`].
pub const SAMPLE_SIZE: usize = 6;

/// Result of [`ExerciseTable::search`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// At least one row matched, in table order.
    Matches(DataSet),
    /// Nothing matched.
    NoMatches,
}

/// Rows grouped by key, in key order.
///
/// Serializes as a JSON object mapping each key to its rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MuscleGroups {
    groups: Vec<(String, DataSet)>,
}

impl MuscleGroups {
    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// `true` when there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Rows of the group named `key`.
    pub fn get(&self, key: &str) -> Option<&DataSet> {
        self.groups.iter().find(|(k, _)| k == key).map(|(_, ds)| ds)
    }

    /// Group keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, rows)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataSet)> {
        self.groups.iter().map(|(k, ds)| (k.as_str(), ds))
    }

    fn push(&mut self, key: String, rows: DataSet) {
        self.groups.push((key, rows));
    }
}

impl Serialize for MuscleGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (key, rows) in &self.groups {
            map.serialize_entry(key, rows)?;
        }
        map.end()
    }
}

/// Immutable in-memory exercise dataset.
#[derive(Debug, Clone)]
pub struct ExerciseTable {
    data: DataSet,
    muscles_idx: usize,
}

impl ExerciseTable {
    /// Load the table from a data file.
    ///
    /// The file must exist and contain a [`TARGET_MUSCLES_COLUMN`] column. Infinities and missing
    /// values are replaced by the empty-string sentinel.
    pub fn load(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<Self> {
        let mut options = options.clone();
        if !options.required_columns.iter().any(|c| c == TARGET_MUSCLES_COLUMN) {
            options.required_columns.push(TARGET_MUSCLES_COLUMN.to_string());
        }
        let raw = ingest_from_path(path, &options)?;
        Self::from_dataset(raw)
    }

    /// Build the table from an already-ingested dataset, applying the same cleanup as [`Self::load`].
    pub fn from_dataset(raw: DataSet) -> IngestionResult<Self> {
        let muscles_idx = raw
            .schema
            .index_of(TARGET_MUSCLES_COLUMN)
            .ok_or_else(|| IngestionError::SchemaMismatch {
                message: format!("missing required column '{TARGET_MUSCLES_COLUMN}'"),
            })?;
        Ok(Self {
            data: clean::clean(&raw),
            muscles_idx,
        })
    }

    /// The cleaned dataset.
    pub fn data(&self) -> &DataSet {
        &self.data
    }

    /// Column names in schema order.
    pub fn columns(&self) -> Vec<String> {
        self.data.schema.field_names().map(str::to_owned).collect()
    }

    /// Rows whose `column` value contains `pattern`, ignoring case, in table order.
    pub fn search(&self, column: &str, pattern: &str) -> Result<SearchOutcome, QueryError> {
        let idx = self
            .data
            .schema
            .index_of(column)
            .ok_or_else(|| QueryError::InvalidColumn {
                column: column.to_string(),
                available: self.columns(),
            })?;
        let matches = filter_contains(&self.data, idx, pattern);
        if matches.is_empty() {
            Ok(SearchOutcome::NoMatches)
        } else {
            Ok(SearchOutcome::Matches(matches))
        }
    }

    /// Rows whose Target_Muscles value contains `muscle`, ignoring case.
    pub fn muscle_group(&self, muscle: &str) -> DataSet {
        filter_contains(&self.data, self.muscles_idx, muscle)
    }

    /// One group per distinct Target_Muscles value, in first-seen order.
    ///
    /// Membership is by containment, so a key like `"Chest"` also collects `"Chest, Triceps"`
    /// rows and groups may overlap.
    pub fn group_by_muscle(&self) -> MuscleGroups {
        let mut groups = MuscleGroups::default();
        for key in group::distinct_keys(&self.data, self.muscles_idx) {
            let rows = self.muscle_group(&key);
            groups.push(key, rows);
        }
        groups
    }

    /// Up to [`SAMPLE_SIZE`] random rows per muscle group.
    ///
    /// With `Some(muscle)` only that group is built, keyed by `muscle` as given; an empty group is
    /// [`QueryError::NoExercisesForMuscle`]. With `None` every distinct Target_Muscles value is
    /// sampled independently.
    pub fn sample_six<R: Rng + ?Sized>(
        &self,
        muscle: Option<&str>,
        rng: &mut R,
    ) -> Result<MuscleGroups, QueryError> {
        let mut out = MuscleGroups::default();
        match muscle {
            Some(muscle) => {
                let rows = self.non_empty_group(muscle)?;
                out.push(muscle.to_string(), sample::sample_up_to(&rows, SAMPLE_SIZE, rng));
            }
            None => {
                for (key, rows) in self.group_by_muscle().groups {
                    let picked = sample::sample_up_to(&rows, SAMPLE_SIZE, rng);
                    out.push(key, picked);
                }
            }
        }
        Ok(out)
    }

    /// Exactly one random row per muscle group.
    ///
    /// A key's own source row always matches it, so groups derived from the table are never
    /// empty; should one be, it is left out of the result.
    pub fn sample_one<R: Rng + ?Sized>(
        &self,
        muscle: Option<&str>,
        rng: &mut R,
    ) -> Result<MuscleGroups, QueryError> {
        let mut out = MuscleGroups::default();
        match muscle {
            Some(muscle) => {
                let rows = self.non_empty_group(muscle)?;
                if let Some(picked) = sample::sample_one(&rows, rng) {
                    out.push(muscle.to_string(), picked);
                }
            }
            None => {
                for (key, rows) in self.group_by_muscle().groups {
                    match sample::sample_one(&rows, rng) {
                        Some(picked) => out.push(key, picked),
                        None => tracing::warn!(muscle = %key, "muscle group is empty, skipping"),
                    }
                }
            }
        }
        Ok(out)
    }

    fn non_empty_group(&self, muscle: &str) -> Result<DataSet, QueryError> {
        let rows = self.muscle_group(muscle);
        if rows.is_empty() {
            return Err(QueryError::NoExercisesForMuscle {
                muscle: muscle.to_string(),
            });
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::types::{DataType, Field, Schema, Value};

    fn table(rows: &[(&str, &str)]) -> ExerciseTable {
        let ds = DataSet::new(
            Schema::new(vec![
                Field::new("Exercise Name", DataType::Utf8),
                Field::new(TARGET_MUSCLES_COLUMN, DataType::Utf8),
            ]),
            rows.iter()
                .map(|(name, muscles)| {
                    vec![Value::Utf8(name.to_string()), Value::Utf8(muscles.to_string())]
                })
                .collect(),
        );
        ExerciseTable::from_dataset(ds).unwrap()
    }

    fn chest_and_back() -> ExerciseTable {
        let mut rows: Vec<(String, &str)> = Vec::new();
        for i in 0..4 {
            rows.push((format!("Chest {i}"), "Chest"));
        }
        for i in 0..9 {
            rows.push((format!("Back {i}"), "Back"));
        }
        let borrowed: Vec<(&str, &str)> = rows.iter().map(|(n, m)| (n.as_str(), *m)).collect();
        table(&borrowed)
    }

    fn names(ds: &DataSet) -> Vec<String> {
        ds.rows.iter().map(|r| r[0].to_string()).collect()
    }

    #[test]
    fn from_dataset_requires_target_muscles() {
        let ds = DataSet::new(
            Schema::new(vec![Field::new("Exercise Name", DataType::Utf8)]),
            Vec::new(),
        );
        let err = ExerciseTable::from_dataset(ds).unwrap_err();
        assert!(err.to_string().contains("missing required column 'Target_Muscles'"));
    }

    #[test]
    fn search_unknown_column_lists_columns() {
        let t = table(&[("Squat", "Quadriceps")]);
        let err = t.search("Colour", "x").unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidColumn {
                column: "Colour".to_string(),
                available: vec!["Exercise Name".to_string(), TARGET_MUSCLES_COLUMN.to_string()],
            }
        );
    }

    #[test]
    fn search_matches_case_insensitively_in_order() {
        let t = table(&[
            ("Bench Press", "Chest"),
            ("Squat", "Quadriceps"),
            ("Leg Press", "Quadriceps"),
        ]);
        match t.search("Exercise Name", "press").unwrap() {
            SearchOutcome::Matches(ds) => assert_eq!(names(&ds), vec!["Bench Press", "Leg Press"]),
            SearchOutcome::NoMatches => panic!("expected matches"),
        }
        assert_eq!(t.search("Exercise Name", "deadlift").unwrap(), SearchOutcome::NoMatches);
    }

    #[test]
    fn groups_use_containment_and_may_overlap() {
        let t = table(&[
            ("Push Up", "Chest"),
            ("Bench Press", "Chest, Triceps"),
            ("Dip", "Triceps"),
        ]);
        let groups = t.group_by_muscle();
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["Chest", "Chest, Triceps", "Triceps"]);
        assert_eq!(names(groups.get("Chest").unwrap()), vec!["Push Up", "Bench Press"]);
        assert_eq!(names(groups.get("Chest, Triceps").unwrap()), vec!["Bench Press"]);
        assert_eq!(names(groups.get("Triceps").unwrap()), vec!["Bench Press", "Dip"]);
    }

    #[test]
    fn sample_six_passes_small_groups_and_samples_large_ones() {
        let t = chest_and_back();
        let mut rng = StdRng::seed_from_u64(42);
        let out = t.sample_six(None, &mut rng).unwrap();

        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["Chest", "Back"]);
        assert_eq!(out.get("Chest").unwrap(), &t.muscle_group("Chest"));

        let back = out.get("Back").unwrap();
        assert_eq!(back.row_count(), SAMPLE_SIZE);
        let unique: HashSet<String> = names(back).into_iter().collect();
        assert_eq!(unique.len(), SAMPLE_SIZE);
        assert!(unique.iter().all(|n| n.starts_with("Back ")));
    }

    #[test]
    fn sample_six_for_one_muscle_is_keyed_by_request() {
        let t = chest_and_back();
        let mut rng = StdRng::seed_from_u64(1);
        let out = t.sample_six(Some("back"), &mut rng).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.get("back").unwrap().row_count(), SAMPLE_SIZE);

        let err = t.sample_six(Some("Calves"), &mut rng).unwrap_err();
        assert_eq!(err.to_string(), "No exercises found for the muscle: Calves");
    }

    #[test]
    fn sample_one_draws_one_member_per_group() {
        let t = chest_and_back();
        let mut rng = StdRng::seed_from_u64(9);
        let out = t.sample_one(None, &mut rng).unwrap();
        assert_eq!(out.len(), 2);
        for (key, rows) in out.iter() {
            assert_eq!(rows.row_count(), 1);
            assert!(t.muscle_group(key).rows.contains(&rows.rows[0]));
        }

        let err = t.sample_one(Some("Nonexistent"), &mut rng).unwrap_err();
        assert_eq!(err.to_string(), "No exercises found for the muscle: Nonexistent");
    }

    #[test]
    fn non_text_muscle_values_form_empty_groups() {
        let ds = DataSet::new(
            Schema::new(vec![
                Field::new("Exercise Name", DataType::Utf8),
                Field::new(TARGET_MUSCLES_COLUMN, DataType::Utf8),
            ]),
            vec![
                vec![Value::Utf8("Odd".to_string()), Value::Int64(7)],
                vec![Value::Utf8("Curl".to_string()), Value::Utf8("Biceps".to_string())],
            ],
        );
        let t = ExerciseTable::from_dataset(ds).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let six = t.sample_six(None, &mut rng).unwrap();
        assert_eq!(six.get("7").map(DataSet::row_count), Some(0));

        let one = t.sample_one(None, &mut rng).unwrap();
        assert_eq!(one.keys().collect::<Vec<_>>(), vec!["Biceps"]);
    }
}
