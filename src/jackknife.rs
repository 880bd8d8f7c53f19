//! Leave-one-out (jackknife) estimates.
//!
//! Used solely to derive the BCa acceleration constant: one estimate per
//! sample index with that element's contribution removed, plus the
//! average of the estimates (the jackknife theta).

use crate::numeric::{CompensatedSum, SummationDiagnostics};
use crate::order::percentile_r6;

/// Leave-one-out estimates together with their average.
#[derive(Debug, Clone)]
pub struct JackknifeEstimates {
    /// `estimates[i]` is the statistic with element `i` held out.
    pub estimates: Vec<f64>,
    /// Average of the leave-one-out estimates.
    pub theta: f64,
}

/// Leave-one-out means.
///
/// `total` must be the compensated sum of `sample`; each estimate is
/// `(total - sample[i]) / (n - 1)`. The average of these is
/// mathematically the sample mean itself.
pub fn jackknife_means(
    sample: &[f64],
    total: f64,
    diagnostics: &mut SummationDiagnostics,
) -> JackknifeEstimates {
    let n = sample.len();
    debug_assert!(n >= 2, "jackknife needs at least two elements");

    let mut estimates = Vec::with_capacity(n);
    let mut theta_sum = CompensatedSum::new("jackknife-mean-theta");
    for &x in sample {
        let estimate = (total - x) / (n - 1) as f64;
        theta_sum.add(estimate);
        estimates.push(estimate);
    }
    let theta = theta_sum.finish(diagnostics) / n as f64;
    JackknifeEstimates { estimates, theta }
}

/// Leave-one-out R6 percentiles of a sorted sample.
///
/// Rather than materializing an `n-1` element copy per index, the R6
/// interpolation is evaluated through an index remapping that skips the
/// held-out position.
pub fn jackknife_percentiles(
    sorted: &[f64],
    p: f64,
    diagnostics: &mut SummationDiagnostics,
) -> JackknifeEstimates {
    let n = sorted.len();
    debug_assert!(n >= 2, "jackknife needs at least two elements");

    let mut estimates = Vec::with_capacity(n);
    let mut theta_sum = CompensatedSum::new("jackknife-percentile-theta");
    for skip in 0..n {
        let estimate = percentile_skipping(p, sorted, skip);
        theta_sum.add(estimate);
        estimates.push(estimate);
    }
    let theta = theta_sum.finish(diagnostics) / n as f64;
    JackknifeEstimates { estimates, theta }
}

/// Index into `sorted` as if position `skip` were removed.
#[inline]
fn remap(j: usize, skip: usize) -> usize {
    if j < skip {
        j
    } else {
        j + 1
    }
}

/// R6 percentile of `sorted` with position `skip` conceptually removed.
fn percentile_skipping(p: f64, sorted: &[f64], skip: usize) -> f64 {
    let m = sorted.len() - 1;
    let h = p * (m as f64 + 1.0);
    let k = h.floor() as usize;
    let d = h - h.floor();

    if k == 0 {
        return sorted[remap(0, skip)];
    }
    if k >= m {
        return sorted[remap(m - 1, skip)];
    }
    let lower = sorted[remap(k - 1, skip)];
    let upper = sorted[remap(k, skip)];
    lower + d * (upper - lower)
}
