//! Bootstrap Confidence-Interval Engine
//!
//! Converts raw per-test statistics from an entropy assessment suite
//! into defensible point estimates and conservative confidence bounds,
//! using the bias-corrected and accelerated (BCa) bootstrap with a
//! mandatory conservative fallback chain.
//!
//! # Architecture
//!
//! The engine is layered, leaves first:
//!
//! ```text
//! numeric (tolerant compare, compensated sums)
//!     → order (sort, rank counts, R6 percentiles, trimming)
//!     → adequacy (binomial + birthday-bound gates)
//!     → jackknife / resample (acceleration inputs, parallel rounds)
//!     → interval (BCa builder and fallback chain)
//! ```
//!
//! # Design Principles
//!
//! - **Conservative on doubt**: any gate failure or pathological
//!   correction degrades the method (BCa → BC → percentile → extremal)
//!   rather than guessing
//! - **Deterministic**: one seed fixes every worker's random stream, so
//!   a run is reproducible bit for bit
//! - **Auditable**: the chosen method and every fallback reason are
//!   logged, and the computed correction constants ride along in the
//!   result
//! - **No silent numerics**: allocation failure and non-finite results
//!   are surfaced as errors, never papered over
//!
//! # Example
//!
//! ```
//! use entropy_bounds::{
//!     bootstrap_mean, BootstrapConfig, StreamSource, ValidityRange,
//! };
//!
//! let mut sample: Vec<f64> = (0..200).map(|i| (i % 17) as f64 * 0.25).collect();
//! let config = BootstrapConfig::new(2_000, 0.99);
//! config.validate().unwrap();
//!
//! let interval = bootstrap_mean(
//!     &mut sample,
//!     &ValidityRange::unbounded(),
//!     &config,
//!     &StreamSource::from_seed([42u8; 32]),
//! )
//! .unwrap();
//!
//! assert!(interval.lower <= interval.point && interval.point <= interval.upper);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod adequacy;
pub mod config;
pub mod interval;
pub mod jackknife;
pub mod numeric;
pub mod order;
pub mod resample;

// Re-export the entry points and commonly used types at the crate root
pub use adequacy::{
    binomial_cdf, combinations_greater_than_bound, selections_for_birthday_collision_bound,
    PercentileSupport,
};
pub use config::{BootstrapConfig, ConfigError};
pub use interval::{
    bootstrap_mean, bootstrap_percentile, confidence_interval, mean, percentile, BootstrapError,
    ConfidenceInterval, IntervalMethod,
};
pub use numeric::{CompensatedSum, SummationDiagnostics, Tolerance};
pub use order::{above_value, below_value, trim_to_range, ValidityRange};
pub use resample::{Statistic, StreamSource};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
