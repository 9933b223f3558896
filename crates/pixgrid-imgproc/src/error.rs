use pixgrid_image::ImageError;

use crate::parallel::ParallelError;

/// An error type for the filter operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The image could not be read, written or copied.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The rows could not be scheduled on the requested workers.
    #[error(transparent)]
    Parallel(#[from] ParallelError),

    /// The filter name is not one of grayscale, reflect, blur or edges.
    #[error("invalid filter type: {0}")]
    InvalidFilter(String),
}
