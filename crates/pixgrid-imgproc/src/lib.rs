#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// error types for the filters.
pub mod error;

/// image filtering module.
pub mod filter;

/// image flipping module.
pub mod flip;

/// module containing parallization utilities.
pub mod parallel;

/// rounding helpers shared by the filters.
pub mod round;

mod dispatch;

pub use crate::dispatch::Filter;
pub use crate::error::FilterError;
pub use crate::parallel::ExecutionStrategy;
