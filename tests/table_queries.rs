use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use exercise_query_service::ingestion::IngestionOptions;
use exercise_query_service::table::{ExerciseTable, SearchOutcome, SAMPLE_SIZE, TARGET_MUSCLES_COLUMN};
use exercise_query_service::types::{DataSet, Value};
use exercise_query_service::{IngestionError, QueryError};

fn fixture_table() -> ExerciseTable {
    ExerciseTable::load("tests/fixtures/exercises.csv", &IngestionOptions::default()).unwrap()
}

fn text(v: &Value) -> String {
    v.to_string()
}

#[test]
fn load_fails_for_missing_file() {
    let err = ExerciseTable::load("tests/fixtures/gym_exercise_dataset.csv", &IngestionOptions::default())
        .unwrap_err();
    assert!(matches!(err, IngestionError::MissingDataFile { .. }));
}

#[test]
fn load_requires_target_muscles_column() {
    let path = std::env::temp_dir().join("exercise-query-service-no-muscles.csv");
    std::fs::write(&path, "Exercise Name,Equipment\nCurl,Dumbbell\n").unwrap();

    let err = ExerciseTable::load(&path, &IngestionOptions::default()).unwrap_err();
    assert!(err.to_string().contains("missing required column 'Target_Muscles'"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_leaves_no_missing_or_non_finite_values() {
    let table = fixture_table();
    for value in table.data().rows.iter().flatten() {
        match value {
            Value::Null => panic!("null survived cleanup"),
            Value::Float64(f) => assert!(f.is_finite()),
            _ => {}
        }
    }
}

#[test]
fn search_reflects_cleaned_sentinel_not_missing_marker() {
    let table = fixture_table();
    let rows = match table.search("Exercise Name", "Leg Press").unwrap() {
        SearchOutcome::Matches(rows) => rows,
        SearchOutcome::NoMatches => panic!("expected a match"),
    };
    assert_eq!(rows.row_count(), 1);
    let rating_idx = rows.schema.index_of("Rating").unwrap();
    assert_eq!(rows.rows[0][rating_idx], Value::Utf8(String::new()));

    let json = serde_json::to_value(&rows).unwrap();
    assert_eq!(json[0]["Rating"], serde_json::json!(""));
}

#[test]
fn search_matches_exactly_the_rows_containing_the_pattern() {
    let table = fixture_table();
    let idx = table.data().schema.index_of("Exercise Name").unwrap();
    let matched = match table.search("Exercise Name", "press").unwrap() {
        SearchOutcome::Matches(rows) => rows,
        SearchOutcome::NoMatches => panic!("expected matches"),
    };

    let names: Vec<String> = matched.rows.iter().map(|r| text(&r[idx])).collect();
    assert_eq!(names, vec!["Bench Press", "Incline Bench Press", "Leg Press"]);

    for row in &table.data().rows {
        let contains = text(&row[idx]).to_lowercase().contains("press");
        assert_eq!(contains, matched.rows.contains(row));
    }
}

#[test]
fn search_with_no_hits_is_not_an_error() {
    let table = fixture_table();
    assert_eq!(table.search("Equipment", "kettlebell").unwrap(), SearchOutcome::NoMatches);
}

#[test]
fn search_unknown_column_reports_all_columns_for_any_pattern() {
    let table = fixture_table();
    for pattern in ["", "press", "zzz"] {
        let err = table.search("Body Part", pattern).unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidColumn {
                column: "Body Part".to_string(),
                available: table.columns(),
            }
        );
    }
}

#[test]
fn group_keys_are_each_distinct_value_once() {
    let table = fixture_table();
    let groups = table.group_by_muscle();
    assert_eq!(
        groups.keys().collect::<Vec<_>>(),
        vec!["Chest, Triceps", "Chest", "Quadriceps", "Quadriceps, Glutes", "Back", ""]
    );
    // Containment: "Chest" collects the compound "Chest, Triceps" row too.
    assert_eq!(groups.get("Chest").map(DataSet::row_count), Some(3));
    // The sentinel key contains every text value.
    assert_eq!(groups.get("").map(DataSet::row_count), Some(13));
}

#[test]
fn sample_six_passes_small_groups_through_and_samples_large_ones() {
    let table = fixture_table();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..20 {
        let out = table.sample_six(None, &mut rng).unwrap();
        assert_eq!(out.len(), 6);
        for (key, rows) in out.iter() {
            let group = table.muscle_group(key);
            if group.row_count() <= SAMPLE_SIZE {
                assert_eq!(rows, &group);
            } else {
                assert_eq!(rows.row_count(), SAMPLE_SIZE);
                let unique: HashSet<String> = rows.rows.iter().map(|r| text(&r[0])).collect();
                assert_eq!(unique.len(), SAMPLE_SIZE);
                assert!(rows.rows.iter().all(|r| group.rows.contains(r)));
            }
        }
    }
}

#[test]
fn sample_six_for_requested_muscle() {
    let table = fixture_table();
    let mut rng = StdRng::seed_from_u64(7);

    let back = table.sample_six(Some("Back"), &mut rng).unwrap();
    assert_eq!(back.keys().collect::<Vec<_>>(), vec!["Back"]);
    assert_eq!(back.get("Back").map(DataSet::row_count), Some(SAMPLE_SIZE));

    let quads = table.sample_six(Some("quadriceps"), &mut rng).unwrap();
    assert_eq!(quads.get("quadriceps"), Some(&table.muscle_group("quadriceps")));

    let err = table.sample_six(Some("Calves"), &mut rng).unwrap_err();
    assert_eq!(
        err,
        QueryError::NoExercisesForMuscle {
            muscle: "Calves".to_string()
        }
    );
}

#[test]
fn sample_one_returns_one_group_member_per_key() {
    let table = fixture_table();
    let mut rng = StdRng::seed_from_u64(99);
    let muscles_idx = table.data().schema.index_of(TARGET_MUSCLES_COLUMN).unwrap();

    let out = table.sample_one(None, &mut rng).unwrap();
    assert_eq!(out.len(), 6);
    for (key, rows) in out.iter() {
        assert_eq!(rows.row_count(), 1);
        let muscles = text(&rows.rows[0][muscles_idx]).to_lowercase();
        assert!(muscles.contains(&key.to_lowercase()));
    }

    let chest = table.sample_one(Some("chest"), &mut rng).unwrap();
    assert_eq!(chest.get("chest").map(DataSet::row_count), Some(1));

    let err = table.sample_one(Some("Nonexistent"), &mut rng).unwrap_err();
    assert_eq!(err.to_string(), "No exercises found for the muscle: Nonexistent");
}

#[test]
fn group_keys_keep_padding_from_the_file() {
    let path = std::env::temp_dir().join("exercise-query-service-padded.csv");
    std::fs::write(&path, "Exercise Name,Target_Muscles\nCurl , Biceps\nHammer Curl,Biceps\n").unwrap();

    let table = ExerciseTable::load(&path, &IngestionOptions::default()).unwrap();
    let groups = table.group_by_muscle();
    assert_eq!(groups.keys().collect::<Vec<_>>(), vec![" Biceps", "Biceps"]);
    // " Biceps" only matches the padded row; "Biceps" is contained in both.
    assert_eq!(groups.get(" Biceps").map(DataSet::row_count), Some(1));
    assert_eq!(groups.get("Biceps").map(DataSet::row_count), Some(2));

    let _ = std::fs::remove_file(&path);
}
