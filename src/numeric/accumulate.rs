//! Adaptive-precision compensated summation.
//!
//! [`CompensatedSum`] maintains a list of non-overlapping partial sums
//! (Shewchuk's adaptive scheme, as used by `math.fsum`): the result is
//! independent of input ordering and survives catastrophic cancellation.
//! Every mean, variance, and acceleration computation in the engine sums
//! through this type.
//!
//! Lower-fidelity Kahan and naive running sums are carried alongside
//! purely as diagnostics: they let the caller log how far an ordinary
//! summation would have drifted, and never affect the returned result.

/// An unevaluated high/low pair representing `hi + lo` exactly.
///
/// Returned by [`CompensatedSum::extended`] for consumers that want more
/// than one f64 of headroom (the acceleration constant computation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extended {
    /// Leading component (the rounded sum).
    pub hi: f64,
    /// Trailing component (the rounding residual of `hi`).
    pub lo: f64,
}

impl Extended {
    /// Collapses the pair to a single f64.
    pub fn value(&self) -> f64 {
        self.hi + self.lo
    }
}

/// Error-free transformation of `a + b` into a rounded sum and an exact
/// residual. Branchless form; requires no magnitude ordering.
#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let hi = a + b;
    let a_virtual = hi - b;
    let b_virtual = hi - a_virtual;
    let lo = (a - a_virtual) + (b - b_virtual);
    (hi, lo)
}

/// Adaptive-precision running sum.
///
/// Feed values with [`add`](Self::add), then extract the total once with
/// [`finish`](Self::finish) (or peek with [`value`](Self::value)). The
/// partials list stays short in practice, O(log n) limbs, so each
/// addition is cheap.
#[derive(Debug, Clone)]
pub struct CompensatedSum {
    label: &'static str,
    partials: Vec<f64>,
    count: u64,
    // Diagnostic shadows; never read for results.
    kahan: f64,
    kahan_c: f64,
    naive: f64,
}

impl CompensatedSum {
    /// Creates an empty accumulator. The label identifies it in
    /// diagnostic records and trace logs.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            partials: Vec::new(),
            count: 0,
            kahan: 0.0,
            kahan_c: 0.0,
            naive: 0.0,
        }
    }

    /// Adds a value, folding it against each existing partial so the
    /// partials stay mutually non-overlapping.
    pub fn add(&mut self, x: f64) {
        debug_assert!(!x.is_nan(), "NaN fed to accumulator '{}'", self.label);
        self.count += 1;

        // Diagnostic shadows.
        self.naive += x;
        let y = x - self.kahan_c;
        let t = self.kahan + y;
        self.kahan_c = (t - self.kahan) - y;
        self.kahan = t;

        // Adaptive fold: each existing partial is consumed into a new
        // rounded sum, and only non-zero residuals are kept.
        let mut carry = x;
        let mut kept = 0;
        for j in 0..self.partials.len() {
            let (hi, lo) = two_sum(carry, self.partials[j]);
            if lo != 0.0 {
                self.partials[kept] = lo;
                kept += 1;
            }
            carry = hi;
        }
        self.partials.truncate(kept);
        self.partials.push(carry);
    }

    /// Number of values added so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Current total without consuming the accumulator.
    pub fn value(&self) -> f64 {
        self.round_partials().hi
    }

    /// Current total as an unevaluated `hi + lo` pair.
    pub fn extended(&self) -> Extended {
        self.round_partials()
    }

    /// Consumes the accumulator, records a diagnostic entry, and returns
    /// the total.
    pub fn finish(self, diagnostics: &mut SummationDiagnostics) -> f64 {
        let result = self.value();
        diagnostics.record(self.label, result, self.kahan + self.kahan_c, self.naive);
        result
    }

    /// Sums the partials from largest magnitude backward, applying the
    /// half-ulp correction when the discarded residual and the next
    /// partial share a sign (round-half-even adjustment).
    fn round_partials(&self) -> Extended {
        let mut n = self.partials.len();
        if n == 0 {
            return Extended { hi: 0.0, lo: 0.0 };
        }

        n -= 1;
        let mut hi = self.partials[n];
        let mut lo = 0.0;
        while n > 0 {
            n -= 1;
            let x = hi;
            let y = self.partials[n];
            hi = x + y;
            lo = y - (hi - x);
            if lo != 0.0 {
                break;
            }
        }
        // If the residual and the next-lower partial agree in sign, the
        // rounded sum sits exactly on a halfway point and doubling the
        // residual is exactly representable.
        if n > 0 && ((lo < 0.0 && self.partials[n - 1] < 0.0) || (lo > 0.0 && self.partials[n - 1] > 0.0))
        {
            let y = lo * 2.0;
            let x = hi + y;
            if y == x - hi {
                hi = x;
                lo = -lo;
            }
        }
        Extended { hi, lo }
    }
}

/// One diagnostic record per finished accumulator.
#[derive(Debug, Clone)]
pub struct SummationRecord {
    /// Label the accumulator was created with.
    pub label: &'static str,
    /// Adaptive (returned) result.
    pub adaptive: f64,
    /// Kahan shadow result.
    pub kahan: f64,
    /// Naive running-sum shadow result.
    pub naive: f64,
}

impl SummationRecord {
    /// Relative gap between the adaptive result and the naive shadow.
    pub fn naive_gap(&self) -> f64 {
        relative_gap(self.adaptive, self.naive)
    }
}

fn relative_gap(reference: f64, shadow: f64) -> f64 {
    if reference == shadow {
        return 0.0;
    }
    let scale = reference.abs().max(shadow.abs());
    if scale < f64::MIN_POSITIVE {
        0.0
    } else {
        (reference - shadow).abs() / scale
    }
}

/// Diagnostics context aggregated by whoever owns the computation.
///
/// Passed explicitly into [`CompensatedSum::finish`]; there is no global
/// state. The interval builder logs the worst observed gap at trace
/// level once a computation completes.
#[derive(Debug, Default)]
pub struct SummationDiagnostics {
    records: Vec<SummationRecord>,
}

impl SummationDiagnostics {
    /// Creates an empty diagnostics context.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, label: &'static str, adaptive: f64, kahan: f64, naive: f64) {
        self.records.push(SummationRecord {
            label,
            adaptive,
            kahan,
            naive,
        });
    }

    /// All records collected so far.
    pub fn records(&self) -> &[SummationRecord] {
        &self.records
    }

    /// The record with the largest adaptive-vs-naive relative gap.
    pub fn worst(&self) -> Option<&SummationRecord> {
        self.records
            .iter()
            .max_by(|a, b| a.naive_gap().total_cmp(&b.naive_gap()))
    }

    /// Emits a trace event per record whose naive shadow drifted.
    pub fn emit(&self) {
        for record in &self.records {
            let gap = record.naive_gap();
            if gap > 0.0 {
                tracing::trace!(
                    label = record.label,
                    adaptive = record.adaptive,
                    kahan = record.kahan,
                    naive = record.naive,
                    relative_gap = gap,
                    "naive summation drifted from compensated result"
                );
            }
        }
    }
}
