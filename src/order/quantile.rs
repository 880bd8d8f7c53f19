//! Sorting, duplicate counting, and Hyndman–Fan R6 percentiles.

use crate::numeric::Tolerance;

/// Sorts a sample ascending in place.
///
/// `f64::total_cmp` gives a total order; the engine's entry points
/// assert NaN absence before any data reaches this point.
pub fn sort_sample(sample: &mut [f64]) {
    debug_assert!(
        sample.iter().all(|x| !x.is_nan()),
        "NaN present in sample at sort time"
    );
    sample.sort_by(f64::total_cmp);
}

/// Counts distinct values in sorted data, where "distinct" means the
/// tolerance comparator rejects equality with the previous element.
pub fn distinct_count(sorted: &[f64], tolerance: &Tolerance) -> usize {
    if sorted.is_empty() {
        return 0;
    }
    let mut distinct = 1;
    for pair in sorted.windows(2) {
        if !tolerance.equal(pair[0], pair[1]) {
            distinct += 1;
        }
    }
    distinct
}

/// Hyndman–Fan R6 percentile of ascending-sorted data.
///
/// With `k = floor(p*(n+1))` and `d = frac(p*(n+1))`: clamped to the
/// first element when `k == 0`, to the last when `k >= n`, otherwise
/// linearly interpolated between `data[k-1]` and `data[k]`.
///
/// # Panics
///
/// Panics in debug builds if `sorted` is empty; callers gate on a
/// non-empty trimmed sample first.
pub fn percentile_r6(p: f64, sorted: &[f64]) -> f64 {
    debug_assert!(!sorted.is_empty(), "percentile of empty sample");
    debug_assert!((0.0..=1.0).contains(&p), "percentile rank out of [0,1]");
    let n = sorted.len();
    let h = p * (n as f64 + 1.0);
    let k = h.floor() as usize;
    let d = h - h.floor();

    if k == 0 {
        return sorted[0];
    }
    if k >= n {
        return sorted[n - 1];
    }
    sorted[k - 1] + d * (sorted[k] - sorted[k - 1])
}
