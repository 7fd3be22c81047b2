//! Sorting and tie-aware rank search shared by the percentile mapper and the
//! FDR estimator.

/// Sorts a slice of values ascending in place
///
/// Uses the IEEE total order so the sort never panics; duplicate values are
/// interchangeable so stability is not required.
pub fn sort_ascending(values: &mut [f64]) {
    values.sort_unstable_by(|a, b| a.total_cmp(b));
}

/// Returns true if the values are in ascending order
pub fn is_ascending(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

/// Counts the elements of `sorted` that are less than or equal to `query`
///
/// Binary search in `O(log n)`. `sorted` must already be ascending.
pub fn rank_below_or_equal(query: f64, sorted: &[f64]) -> usize {
    sorted.partition_point(|&v| v <= query)
}

/// Mid-rank cumulative fraction of `value` within `sorted`
///
/// Two rank searches offset by `epsilon` bracket the run of values tied
/// with `value`; their average places the value at the middle of the run.
/// For `n` distinct values the `i`-th smallest (0-indexed) maps to
/// `(2i + 1) / 2n`.
pub fn mid_rank(value: f64, sorted: &[f64], epsilon: f64) -> f64 {
    let low = rank_below_or_equal(value - epsilon, sorted);
    let high = rank_below_or_equal(value + epsilon, sorted);
    (low + high) as f64 / (2 * sorted.len()) as f64
}
