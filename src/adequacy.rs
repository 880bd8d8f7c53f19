//! Sample-adequacy gates evaluated before any bootstrap work begins.
//!
//! Two independent questions:
//!
//! 1. Is the requested percentile statistically meaningful for this
//!    sample size at all (binomial tail probability of seeing enough
//!    extreme elements)?
//! 2. Can resampling with replacement explore enough of the outcome
//!    space to make bias/acceleration correction trustworthy (birthday
//!    bound on repeated resamples vs. the multiset space `C(2n-1, n)`)?
//!
//! A failed gate never produces an error; it forces the conservative
//! extremal path or, at worst, a degenerate "no information" result.

use statrs::function::beta::beta_reg;

/// Probability cutoff above which a percentile request is considered
/// statistically unsupported.
pub const ADEQUACY_CUTOFF: f64 = 0.5;

/// Minimum elements at least as extreme as the requested tail for a
/// percentile estimate to carry information.
pub const MIN_EXTREME_ELEMENTS: u64 = 5;

/// Minimum sample size for bias/acceleration-corrected bootstrapping.
pub const MIN_BOOTSTRAP_SAMPLE: usize = 30;

/// Exponent of the tolerated resample-collision probability: repeats of
/// the exact same resample must stay below `2^-10` likely.
pub const COLLISION_BIT_EXPONENT: u32 = 10;

/// Verdict of the statistical-meaningfulness gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentileSupport {
    /// Enough tail mass for full bias/acceleration correction.
    Full,
    /// Tail is thin; only extremal bootstrap bounds are defensible.
    ExtremalOnly,
    /// The sample very likely contains no element in the requested
    /// tail; only a degenerate min/max answer is honest.
    Unsupported,
}

/// Cumulative binomial probability `P(X <= k)` for `X ~ Binomial(n, p)`.
///
/// Evaluated through the regularized incomplete beta function,
/// `I_{1-p}(n-k, k+1)`, which stays accurate for the large `n` this
/// engine sees.
pub fn binomial_cdf(k: u64, n: u64, p: f64) -> f64 {
    if n == 0 || k >= n || p <= 0.0 {
        return 1.0;
    }
    if p >= 1.0 {
        return 0.0;
    }
    beta_reg((n - k) as f64, (k + 1) as f64, 1.0 - p)
}

/// Whether `C(n, k)` exceeds `bound`, without computing `C(n, k)`.
///
/// The partial products `C` passes through are monotone non-decreasing
/// (every factor `(n-k+i)/i` is at least 1 for `k <= n/2`), so the loop
/// can exit as soon as the bound is crossed instead of overflowing.
pub fn combinations_greater_than_bound(n: u64, k: u64, bound: f64) -> bool {
    if k > n {
        return 0.0 > bound;
    }
    let k = k.min(n - k);
    let mut c = 1.0_f64;
    if c > bound {
        return true;
    }
    for i in 1..=k {
        c *= (n - k + i) as f64 / i as f64;
        if c > bound {
            return true;
        }
    }
    false
}

/// Minimum number of equally likely distinct resamples needed so that
/// `rounds` draws repeat an exact resample with probability below
/// `2^-bit_exponent`.
///
/// Uses the standard birthday approximation: the collision probability
/// of `r` draws over `m` outcomes is about `r(r-1)/(2m)`, so
/// `m >= r(r-1)/2 * 2^b`. Saturates instead of overflowing; the caller
/// only ever compares the result against a combinatorial growth check.
pub fn selections_for_birthday_collision_bound(rounds: u64, bit_exponent: u32) -> u128 {
    let r = rounds as u128;
    let pairs = r * r.saturating_sub(1) / 2;
    pairs.saturating_mul(1u128 << bit_exponent.min(127))
}

/// Gate 1: statistical meaningfulness of a percentile request.
///
/// With `q = min(p, 1-p)`, a sample of size `n` supports the request
/// only if it plausibly contains at least [`MIN_EXTREME_ELEMENTS`]
/// elements in the `q`-tail.
pub fn percentile_support(p: f64, n: usize) -> PercentileSupport {
    let q = p.min(1.0 - p);
    let few_extreme = binomial_cdf(MIN_EXTREME_ELEMENTS - 1, n as u64, q);
    if few_extreme <= ADEQUACY_CUTOFF {
        return PercentileSupport::Full;
    }

    let zero_extreme = binomial_cdf(0, n as u64, q);
    if zero_extreme > ADEQUACY_CUTOFF {
        tracing::warn!(
            percentile = p,
            sample_size = n,
            p_zero_extreme = zero_extreme,
            "percentile request statistically unsupported"
        );
        PercentileSupport::Unsupported
    } else {
        tracing::debug!(
            percentile = p,
            sample_size = n,
            p_few_extreme = few_extreme,
            "thin tail; restricting to extremal bootstrap bounds"
        );
        PercentileSupport::ExtremalOnly
    }
}

/// Gate 2: can `rounds` resamples of size `n` stay effectively distinct?
///
/// `distinct` is the tolerance-based distinct-value count of the trimmed
/// sample. Returns true when bias/acceleration correction is supported.
pub fn resampling_diversity(distinct: usize, n: usize, rounds: usize) -> bool {
    if n < MIN_BOOTSTRAP_SAMPLE || distinct == 0 {
        return false;
    }
    let needed = selections_for_birthday_collision_bound(rounds as u64, COLLISION_BIT_EXPONENT);
    let d = distinct as u64;
    // Resamples of size n over d distinct symbols form C(n+d-1, n)
    // multisets. With d <= n that count is at least C(2d-1, d), the
    // size-d multiset count, which is the bound tested here: a sample
    // passing on the smaller count passes on the true one.
    combinations_greater_than_bound(2 * d - 1, d, needed as f64)
}
