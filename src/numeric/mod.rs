//! Precision-arithmetic substrate.
//!
//! Tolerant comparison and compensated summation, the two numeric
//! primitives everything above relies on.

mod accumulate;
mod compare;

pub use accumulate::{CompensatedSum, Extended, SummationDiagnostics, SummationRecord};
pub use compare::Tolerance;
