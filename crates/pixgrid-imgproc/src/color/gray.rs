use pixgrid_image::Image;

use crate::error::FilterError;
use crate::parallel::{self, ExecutionStrategy};
use crate::round::div_round;

/// Convert an RGB8 image to grayscale in place using the channel mean:
///
/// Y = round((R + G + B) / 3)
///
/// All three channels of every pixel are set to `Y`. Each pixel only depends
/// on its own value, so no copy of the image is taken.
///
/// # Arguments
///
/// * `image` - The RGB8 image to convert.
///
/// # Example
///
/// ```
/// use pixgrid_image::{Image, ImageSize};
/// use pixgrid_imgproc::color::grayscale;
///
/// let mut image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![255, 0, 0, 10, 20, 31],
/// )
/// .unwrap();
///
/// grayscale(&mut image).unwrap();
/// assert_eq!(image.as_slice(), &[85, 85, 85, 20, 20, 20]);
/// ```
pub fn grayscale(image: &mut Image<u8, 3>) -> Result<(), FilterError> {
    grayscale_with(image, ExecutionStrategy::default())
}

/// Same as [`grayscale`], with an explicit execution strategy.
pub fn grayscale_with(
    image: &mut Image<u8, 3>,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    log::debug!("grayscale {} ({strategy})", image.size());

    parallel::for_each_row(image, strategy, |_, row| {
        row.chunks_exact_mut(3).for_each(|px| {
            let sum = px[0] as u32 + px[1] as u32 + px[2] as u32;
            px.fill(div_round(sum, 3));
        });
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use pixgrid_image::{Image, ImageSize, Rgb8};

    use crate::error::FilterError;
    use crate::parallel::ExecutionStrategy;

    #[test]
    fn test_grayscale_mean() -> Result<(), FilterError> {
        let mut image = Image::<u8, 3>::new(
            ImageSize {
                width: 4,
                height: 1,
            },
            vec![
                0, 0, 1, // 0.33
                0, 1, 1, // 0.67
                27, 28, 28, // 27.67
                255, 255, 255,
            ],
        )?;

        super::grayscale(&mut image)?;

        assert_eq!(
            image.to_pixels(),
            vec![
                Rgb8::splat(0),
                Rgb8::splat(1),
                Rgb8::splat(28),
                Rgb8::splat(255)
            ]
        );
        Ok(())
    }

    #[test]
    fn test_grayscale_red_center() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let mut image = Image::<u8, 3>::from_size_val(size, 0)?;
        image.put_pixel(1, 1, Rgb8::new(255, 0, 0))?;

        super::grayscale(&mut image)?;

        for y in 0..3 {
            for x in 0..3 {
                let expected = if (x, y) == (1, 1) { 85 } else { 0 };
                assert_eq!(image.pixel(x, y)?, Rgb8::splat(expected));
            }
        }
        Ok(())
    }

    #[test]
    fn test_grayscale_idempotent() -> Result<(), FilterError> {
        let mut image = Image::<u8, 3>::new(
            [2, 2].into(),
            vec![12, 200, 7, 1, 2, 4, 99, 98, 100, 250, 251, 253],
        )?;

        super::grayscale(&mut image)?;
        let once = image.clone();
        super::grayscale(&mut image)?;

        assert_eq!(image, once);
        assert!(image.to_pixels().iter().all(|px| px.is_gray()));
        Ok(())
    }

    #[test]
    fn test_grayscale_empty() -> Result<(), FilterError> {
        let mut image = Image::<u8, 3>::new([0, 5].into(), vec![])?;
        super::grayscale_with(&mut image, ExecutionStrategy::Serial)?;
        assert_eq!(image.size(), [0, 5].into());
        Ok(())
    }
}
