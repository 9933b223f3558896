use pixgrid_image::Image;

use crate::error::FilterError;
use crate::parallel::{self, ExecutionStrategy};

/// Flip the input image horizontally in place.
///
/// In every row the pixel at column `j` is swapped with the pixel at column
/// `width - 1 - j` for `j < width / 2`. The middle column of an odd width is
/// left as is. Applying the flip twice gives back the original image.
///
/// # Arguments
///
/// * `image` - The image with shape (H, W, C) to flip.
///
/// # Example
///
/// ```
/// use pixgrid_image::{Image, ImageSize};
/// use pixgrid_imgproc::flip::horizontal_flip;
///
/// let mut image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 3,
///         height: 2,
///     },
///     vec![0, 1, 2, 3, 4, 5],
/// )
/// .unwrap();
///
/// horizontal_flip(&mut image).unwrap();
///
/// assert_eq!(image.as_slice(), &[2, 1, 0, 5, 4, 3]);
/// ```
pub fn horizontal_flip<T, const C: usize>(image: &mut Image<T, C>) -> Result<(), FilterError>
where
    T: Send,
{
    horizontal_flip_with(image, ExecutionStrategy::default())
}

/// Same as [`horizontal_flip`], with an explicit execution strategy.
pub fn horizontal_flip_with<T, const C: usize>(
    image: &mut Image<T, C>,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError>
where
    T: Send,
{
    log::debug!("horizontal_flip {} ({strategy})", image.size());

    let cols = image.cols();

    parallel::for_each_row(image, strategy, |_, row| {
        for j in 0..cols / 2 {
            let k = cols - 1 - j;
            for c in 0..C {
                row.swap(j * C + c, k * C + c);
            }
        }
    })?;

    Ok(())
}
