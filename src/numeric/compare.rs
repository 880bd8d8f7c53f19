//! Tiered tolerant floating-point comparison.
//!
//! Every "are these practically the same value" decision in the engine
//! (duplicate counting, degenerate-distribution detection, containment
//! checks) goes through [`Tolerance::equal`] rather than `==`, so that
//! values separated only by rounding noise are not counted as distinct.

use serde::{Deserialize, Serialize};

/// Tolerances for tiered floating-point equality.
///
/// Comparison proceeds through three tiers: an absolute-difference test,
/// a relative test scaled by the larger magnitude, and finally a ULP
/// (units in the last place) distance test for same-signed values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tolerance {
    /// Maximum absolute difference accepted by the first tier.
    pub absolute: f64,
    /// Maximum relative difference (scaled by the larger magnitude).
    pub relative: f64,
    /// Maximum ULP distance accepted for same-signed values.
    pub ulps: u64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            absolute: 1e-12,
            relative: 1e-9,
            ulps: 4,
        }
    }
}

impl Tolerance {
    /// Creates a tolerance with the given absolute, relative, and ULP bounds.
    pub fn new(absolute: f64, relative: f64, ulps: u64) -> Self {
        Self {
            absolute,
            relative,
            ulps,
        }
    }

    /// Tiered tolerant equality.
    ///
    /// - NaN is never equal to anything, including itself.
    /// - Bit-identical values (matching infinities included) are equal.
    /// - A non-identical pair involving an infinity is unequal.
    /// - If the smaller magnitude, the difference, or the scaled relative
    ///   threshold would land in the subnormal range, only the absolute
    ///   test is meaningful and it decides alone.
    /// - Otherwise the relative test runs against the larger magnitude,
    ///   and as a last resort same-signed values within `ulps` units in
    ///   the last place of each other are accepted.
    pub fn equal(&self, a: f64, b: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        if a.to_bits() == b.to_bits() {
            return true;
        }
        if a.is_infinite() || b.is_infinite() {
            return false;
        }

        // Order so the relative threshold scales with the larger magnitude.
        let (small, large) = if a.abs() <= b.abs() { (a, b) } else { (b, a) };
        let diff = (a - b).abs();
        let rel_threshold = self.relative * large.abs();

        // A relative comparison against subnormal quantities is meaningless;
        // fall back to the absolute test alone.
        let degenerate = small.abs() < f64::MIN_POSITIVE
            || diff < f64::MIN_POSITIVE
            || rel_threshold < f64::MIN_POSITIVE;
        if degenerate {
            return diff <= self.absolute;
        }

        if diff <= self.absolute || diff <= rel_threshold {
            return true;
        }

        // Values of opposite sign are never a few ULPs apart.
        if a.is_sign_positive() != b.is_sign_positive() {
            return false;
        }
        let ua = a.abs().to_bits();
        let ub = b.abs().to_bits();
        ua.abs_diff(ub) <= self.ulps
    }
}
