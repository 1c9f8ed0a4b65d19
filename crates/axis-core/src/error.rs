// File: crates/axis-core/src/error.rs
// Summary: Error types for the few configuration seams that can be rejected.

use thiserror::Error;

use crate::time::TimeUnit;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TickError {
    #[error("custom tick labels ({labels}) do not match tick values ({values})")]
    LabelCountMismatch { values: usize, labels: usize },

    #[error("time ticks at {step} x {unit:?} would produce about {estimated} ticks (cap {cap})")]
    TooManyTicks { unit: TimeUnit, step: i32, estimated: usize, cap: usize },

    #[error("time tick step must be positive, got {0}")]
    InvalidStep(i32),
}
