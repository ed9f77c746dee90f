//! Row filtering for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Returns the rows whose text cell at `column_idx` contains `pattern`, ignoring case.
///
/// The match is a literal substring test. Non-text cells (numbers, booleans, nulls) never
/// match. Row order is preserved.
pub fn filter_contains(dataset: &DataSet, column_idx: usize, pattern: &str) -> DataSet {
    let needle = pattern.to_lowercase();
    filter(dataset, |row| {
        row.get(column_idx)
            .and_then(Value::as_text)
            .is_some_and(|text| contains_ignore_case(text, &needle))
    })
}

/// `needle` must already be lowercased.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
