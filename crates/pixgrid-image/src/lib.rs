#![deny(missing_docs)]
//! Image types for the pixgrid filters

/// image representation as an owned row-major buffer.
pub mod image;

/// Error types for the image module.
pub mod error;

/// 8-bit RGB pixel triple.
pub mod pixel;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::pixel::Rgb8;
