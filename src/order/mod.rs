//! Order statistics: sorting, rank counts, percentiles, range trimming.

mod quantile;
mod search;

pub use quantile::{distinct_count, percentile_r6, sort_sample};
pub use search::{above_value, below_value, equal_value, trim_to_range, ValidityRange};
