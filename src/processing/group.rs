//! Grouping keys for [`crate::types::DataSet`].

use std::collections::HashSet;

use crate::types::{DataSet, Value};

/// Distinct values of a column, in first-seen order.
///
/// Text cells contribute their text, other non-null cells their display form. Nulls are skipped.
pub fn distinct_keys(dataset: &DataSet, column_idx: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut keys = Vec::new();
    for value in dataset.rows.iter().filter_map(|row| row.get(column_idx)) {
        if matches!(value, Value::Null) {
            continue;
        }
        let key = value.to_string();
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }
    keys
}
