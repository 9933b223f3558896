//! Filter operations
//!
//! This module provides the 3x3 neighborhood filters: box blur and Sobel edges.

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;
