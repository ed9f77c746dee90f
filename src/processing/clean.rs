//! Load-time cleanup of missing and non-finite values.

use crate::types::{DataSet, Value};

/// Sentinel stored in place of every missing or non-finite value after [`clean`].
pub const EMPTY_SENTINEL: &str = "";

/// Replace every positive/negative infinity with [`Value::Null`].
pub fn replace_non_finite(dataset: &DataSet) -> DataSet {
    dataset.map_rows(|row| {
        row.iter()
            .map(|v| match v {
                Value::Float64(f) if f.is_infinite() => Value::Null,
                other => other.clone(),
            })
            .collect()
    })
}

/// Replace every [`Value::Null`] (and any remaining NaN) with `sentinel`.
pub fn fill_null(dataset: &DataSet, sentinel: &Value) -> DataSet {
    dataset.map_rows(|row| {
        row.iter()
            .map(|v| match v {
                Value::Null => sentinel.clone(),
                Value::Float64(f) if f.is_nan() => sentinel.clone(),
                other => other.clone(),
            })
            .collect()
    })
}

/// Infinities become missing, then every missing value becomes the empty-string sentinel.
///
/// The result holds no `Null` and no non-finite float.
pub fn clean(dataset: &DataSet) -> DataSet {
    fill_null(
        &replace_non_finite(dataset),
        &Value::Utf8(EMPTY_SENTINEL.to_string()),
    )
}
