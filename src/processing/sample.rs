//! Uniform random row sampling.
//!
//! Callers supply the random source so that production code can use an unseeded thread-local
//! generator while tests pass a seeded one.

use rand::seq::index;
use rand::Rng;

use crate::types::DataSet;

/// Up to `n` rows drawn uniformly without replacement.
///
/// When the dataset holds `n` rows or fewer it is returned unchanged (same rows, same order);
/// otherwise exactly `n` distinct rows are drawn.
pub fn sample_up_to<R: Rng + ?Sized>(dataset: &DataSet, n: usize, rng: &mut R) -> DataSet {
    if dataset.row_count() <= n {
        return dataset.clone();
    }
    let picked = index::sample(rng, dataset.row_count(), n).into_vec();
    dataset.select_rows(&picked)
}

/// A single row drawn uniformly, or `None` for an empty dataset.
pub fn sample_one<R: Rng + ?Sized>(dataset: &DataSet, rng: &mut R) -> Option<DataSet> {
    if dataset.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..dataset.row_count());
    Some(dataset.select_rows(&[idx]))
}
