//! Rank counting and range trimming over sorted samples.
//!
//! Binary-search rank counts (`below_value` / `above_value`) are the
//! primitive behind validity trimming and the bias-correction proportion;
//! they return exact counts so `len - below - above` gives the count of
//! elements equal to the probe.

use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` validity bounds for a sample.
///
/// Values outside the range are trimmed before any statistic is
/// computed. Trimming only shrinks the active sub-range of a sorted
/// sample; it never reorders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ValidityRange {
    /// Smallest value considered valid.
    pub min: f64,
    /// Largest value considered valid.
    pub max: f64,
}

impl ValidityRange {
    /// Creates a range from its bounds.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range that accepts every finite value.
    pub fn unbounded() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }
}

impl Default for ValidityRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Number of elements strictly below `v` in ascending-sorted data.
///
/// The partition point maintains the invariant that everything to its
/// left is `< v` and everything at or right of it is `>= v`.
pub fn below_value(v: f64, sorted: &[f64]) -> usize {
    sorted.partition_point(|&x| x < v)
}

/// Number of elements strictly above `v` in ascending-sorted data.
pub fn above_value(v: f64, sorted: &[f64]) -> usize {
    sorted.len() - sorted.partition_point(|&x| x <= v)
}

/// Number of elements equal to `v` (bitwise ordering sense) in sorted data.
pub fn equal_value(v: f64, sorted: &[f64]) -> usize {
    sorted.len() - below_value(v, sorted) - above_value(v, sorted)
}

/// Trims a sorted sample to its validity range.
///
/// Drops the prefix below `range.min` and the suffix above `range.max`
/// via two binary searches and returns the surviving subslice; no
/// reallocation, no reordering.
pub fn trim_to_range<'a>(sorted: &'a [f64], range: &ValidityRange) -> &'a [f64] {
    let start = below_value(range.min, sorted);
    let end = sorted.len() - above_value(range.max, sorted);
    // An inverted range trims everything.
    &sorted[start..end.max(start)]
}
