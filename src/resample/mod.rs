//! Parallel bootstrap resampling.
//!
//! Generates `rounds` resamples of the trimmed sample with replacement
//! and evaluates the target statistic on each, writing results into
//! disjoint chunks of one output vector. Every chunk owns a private
//! random stream and a private scratch buffer; the trimmed sample is
//! shared read-only. The join at the end of the parallel region is the
//! only synchronization point.

mod stream;

pub use stream::StreamSource;

use rand::Rng;
use rayon::prelude::*;
use std::collections::TryReserveError;

use crate::numeric::CompensatedSum;
use crate::order::{percentile_r6, sort_sample};

/// The statistic evaluated on each resample (and on the original
/// sample for the point estimate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Statistic {
    /// Arithmetic mean, compensated summation.
    Mean,
    /// Hyndman–Fan R6 percentile at the given rank in `[0, 1]`.
    Percentile(f64),
}

impl Statistic {
    /// Evaluates the statistic on ascending-sorted data.
    pub fn evaluate_sorted(&self, sorted: &[f64]) -> f64 {
        match *self {
            Statistic::Mean => {
                let mut sum = CompensatedSum::new("statistic-mean");
                for &x in sorted {
                    sum.add(x);
                }
                sum.value() / sorted.len() as f64
            }
            Statistic::Percentile(p) => percentile_r6(p, sorted),
        }
    }

    /// Evaluates the statistic on a scratch resample, sorting it first
    /// when the statistic requires order.
    fn evaluate_scratch(&self, scratch: &mut [f64]) -> f64 {
        if matches!(self, Statistic::Percentile(_)) {
            sort_sample(scratch);
        }
        self.evaluate_sorted(scratch)
    }
}

/// Produces the sorted bootstrap distribution of `statistic` over
/// `rounds` resamples of `sample`.
///
/// The round index space is split into `workers` contiguous chunks;
/// chunk `w` draws from the stream `source.worker_stream(w)`, so the
/// distribution depends only on the seed, the rounds count, and the
/// worker count, never on scheduling.
pub fn bootstrap_distribution(
    sample: &[f64],
    statistic: Statistic,
    rounds: usize,
    workers: usize,
    source: &StreamSource,
) -> Result<Vec<f64>, TryReserveError> {
    debug_assert!(!sample.is_empty(), "resampling an empty sample");
    let n = sample.len();

    let mut distribution: Vec<f64> = Vec::new();
    distribution.try_reserve_exact(rounds)?;
    distribution.resize(rounds, 0.0);

    let chunk_len = rounds.div_ceil(workers.max(1)).max(1);
    distribution
        .par_chunks_mut(chunk_len)
        .enumerate()
        .try_for_each(|(worker, slots)| -> Result<(), TryReserveError> {
            let mut rng = source.worker_stream(worker as u64);
            let mut scratch: Vec<f64> = Vec::new();
            scratch.try_reserve_exact(n)?;

            for slot in slots {
                scratch.clear();
                for _ in 0..n {
                    scratch.push(sample[rng.gen_range(0..n)]);
                }
                *slot = statistic.evaluate_scratch(&mut scratch);
            }
            Ok(())
        })?;

    // All rounds are present once the parallel region joins; the
    // distribution is consumed in sorted order from here on.
    sort_sample(&mut distribution);
    Ok(distribution)
}
