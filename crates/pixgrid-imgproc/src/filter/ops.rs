use pixgrid_image::{Image, ImageError};

use super::kernels::{KERNEL_SIZE, SOBEL_X, SOBEL_Y};
use crate::error::FilterError;
use crate::parallel::{self, ExecutionStrategy};
use crate::round::{div_round, round_clamp_u8};

/// Index of the neighbor at kernel position `k` (0..3) around `i`, if it lies
/// inside `0..len`.
#[inline]
fn neighbor(i: usize, k: usize, len: usize) -> Option<usize> {
    (i + k).checked_sub(1).filter(|&n| n < len)
}

/// Blur an image in place with a 3x3 box filter.
///
/// Every channel of every pixel becomes the rounded mean of the same channel
/// over the 3x3 neighborhood centered on it. Neighbors outside the image are
/// left out of both the sum and the count, so corners average 4 samples,
/// border pixels 6 and interior pixels 9.
///
/// The neighborhoods are read from a snapshot of the image taken before any
/// pixel is written.
///
/// # Arguments
///
/// * `image` - The image with shape (H, W, C) to blur.
///
/// # Errors
///
/// Returns [`ImageError::AllocationFailed`] if the snapshot cannot be
/// allocated. The image is left untouched in that case.
///
/// # Example
///
/// ```
/// use pixgrid_image::Image;
/// use pixgrid_imgproc::filter::box_blur;
///
/// let mut image = Image::<u8, 1>::new([3, 1].into(), vec![0, 30, 60]).unwrap();
/// box_blur(&mut image).unwrap();
/// assert_eq!(image.as_slice(), &[15, 30, 45]);
/// ```
pub fn box_blur<const C: usize>(image: &mut Image<u8, C>) -> Result<(), FilterError> {
    box_blur_with(image, ExecutionStrategy::default())
}

/// Same as [`box_blur`], with an explicit execution strategy.
pub fn box_blur_with<const C: usize>(
    image: &mut Image<u8, C>,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    log::debug!("box_blur {} ({strategy})", image.size());

    let src = image.snapshot()?;
    let (rows, cols) = (src.rows(), src.cols());
    let src_data = src.as_slice();

    parallel::for_each_row(image, strategy, |r, dst_row| {
        for c in 0..cols {
            let mut sum = [0u32; C];
            let mut count = 0u32;

            for y in (0..KERNEL_SIZE).filter_map(|ky| neighbor(r, ky, rows)) {
                for x in (0..KERNEL_SIZE).filter_map(|kx| neighbor(c, kx, cols)) {
                    let idx = src.offset(y, x);
                    for (ch, s) in sum.iter_mut().enumerate() {
                        *s += src_data[idx + ch] as u32;
                    }
                    count += 1;
                }
            }

            let dst_pixel = &mut dst_row[c * C..(c + 1) * C];
            for (dst, &s) in dst_pixel.iter_mut().zip(sum.iter()) {
                *dst = div_round(s, count);
            }
        }
    })?;

    Ok(())
}

/// Convolve the 3x3 neighborhood of (`x`, `y`) with both Sobel kernels.
///
/// Out of bounds neighbors count as zero. No bounds check on `x` and `y`.
#[inline]
fn sobel_at<const C: usize>(src: &Image<u8, C>, x: usize, y: usize) -> ([i32; C], [i32; C]) {
    let src_data = src.as_slice();
    let mut gx = [0i32; C];
    let mut gy = [0i32; C];

    for ky in 0..KERNEL_SIZE {
        let Some(row) = neighbor(y, ky, src.rows()) else {
            continue;
        };
        for kx in 0..KERNEL_SIZE {
            let Some(col) = neighbor(x, kx, src.cols()) else {
                continue;
            };
            let (wx, wy) = (SOBEL_X[ky][kx], SOBEL_Y[ky][kx]);
            let idx = src.offset(row, col);
            for ch in 0..C {
                let val = src_data[idx + ch] as i32;
                gx[ch] += val * wx;
                gy[ch] += val * wy;
            }
        }
    }

    (gx, gy)
}

/// Compute the horizontal and vertical Sobel responses of a single pixel.
///
/// Neighbors outside the image contribute zero. The responses are returned per
/// channel, unclamped.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `x` - The column of the pixel.
/// * `y` - The row of the pixel.
///
/// # Returns
///
/// The tuple `(gx, gy)`.
pub fn sobel_gradient<const C: usize>(
    src: &Image<u8, C>,
    x: usize,
    y: usize,
) -> Result<([i32; C], [i32; C]), ImageError> {
    if x >= src.cols() || y >= src.rows() {
        return Err(ImageError::PixelIndexOutOfBounds(
            x,
            y,
            src.cols(),
            src.rows(),
        ));
    }
    Ok(sobel_at(src, x, y))
}

/// Detect edges in place with the Sobel operator.
///
/// For each channel the output is `min(255, round(sqrt(gx^2 + gy^2)))`, where
/// `gx` and `gy` come from convolving the 3x3 neighborhood with
/// [`SOBEL_X`] and [`SOBEL_Y`]. Pixels outside the image are treated as
/// black. The gradients are accumulated in `i32`, which cannot overflow for
/// 8-bit input.
///
/// The neighborhoods are read from a snapshot of the image taken before any
/// pixel is written.
///
/// # Arguments
///
/// * `image` - The image with shape (H, W, C).
///
/// # Errors
///
/// Returns [`ImageError::AllocationFailed`] if the snapshot cannot be
/// allocated. The image is left untouched in that case.
pub fn sobel_edges<const C: usize>(image: &mut Image<u8, C>) -> Result<(), FilterError> {
    sobel_edges_with(image, ExecutionStrategy::default())
}

/// Same as [`sobel_edges`], with an explicit execution strategy.
pub fn sobel_edges_with<const C: usize>(
    image: &mut Image<u8, C>,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    log::debug!("sobel_edges {} ({strategy})", image.size());

    let src = image.snapshot()?;
    let cols = src.cols();

    parallel::for_each_row(image, strategy, |r, dst_row| {
        for c in 0..cols {
            let (gx, gy) = sobel_at(&src, c, r);
            let dst_pixel = &mut dst_row[c * C..(c + 1) * C];
            for ch in 0..C {
                let magnitude = ((gx[ch] * gx[ch] + gy[ch] * gy[ch]) as f64).sqrt();
                dst_pixel[ch] = round_clamp_u8(magnitude);
            }
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixgrid_image::{ImageSize, Rgb8};

    #[test]
    fn test_box_blur() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };

        let mut img = Image::<u8, 1>::new(size, (0..9).collect())?;

        box_blur(&mut img)?;

        // 2.5, 3.5, 4.5 and 5.5 all round up
        #[rustfmt::skip]
        assert_eq!(
            img.as_slice(),
            &[
                2, 3, 3,
                4, 4, 5,
                5, 6, 6,
            ],
        );

        Ok(())
    }

    #[test]
    fn test_box_blur_divisors() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let mut img = Image::<u8, 3>::from_size_val(size, 0)?;
        img.put_pixel(0, 0, Rgb8::new(240, 120, 36))?;

        box_blur_with(&mut img, ExecutionStrategy::Serial)?;

        // corner: 4 samples
        assert_eq!(img.pixel(0, 0)?, Rgb8::new(60, 30, 9));
        // border: 6 samples
        assert_eq!(img.pixel(1, 0)?, Rgb8::new(40, 20, 6));
        assert_eq!(img.pixel(0, 1)?, Rgb8::new(40, 20, 6));
        // interior: 9 samples
        assert_eq!(img.pixel(1, 1)?, Rgb8::new(27, 13, 4));
        // out of reach
        assert_eq!(img.pixel(2, 2)?, Rgb8::BLACK);
        assert_eq!(img.pixel(2, 0)?, Rgb8::BLACK);

        Ok(())
    }

    #[test]
    fn test_box_blur_ties_round_up() -> Result<(), FilterError> {
        let mut img = Image::<u8, 1>::new([2, 2].into(), vec![255, 0, 255, 0])?;
        box_blur(&mut img)?;
        // 510 / 4 = 127.5
        assert_eq!(img.as_slice(), &[128, 128, 128, 128]);
        Ok(())
    }

    #[test]
    fn test_box_blur_constant() -> Result<(), FilterError> {
        let mut img = Image::<u8, 3>::from_size_val([5, 4].into(), 77)?;
        box_blur(&mut img)?;
        assert!(img.as_slice().iter().all(|&v| v == 77));
        Ok(())
    }

    #[test]
    fn test_box_blur_single_pixel() -> Result<(), FilterError> {
        let mut img = Image::from_pixels([1, 1].into(), &[Rgb8::new(3, 141, 250)])?;
        box_blur(&mut img)?;
        assert_eq!(img.pixel(0, 0)?, Rgb8::new(3, 141, 250));
        Ok(())
    }

    #[test]
    fn test_sobel_step_edge() -> Result<(), FilterError> {
        // column 0 is black, columns 1 and 2 are 10
        #[rustfmt::skip]
        let img = Image::<u8, 1>::new(
            [3, 3].into(),
            vec![
                0, 10, 10,
                0, 10, 10,
                0, 10, 10,
            ],
        )?;

        assert_eq!(sobel_gradient(&img, 0, 0)?, ([30], [10]));
        assert_eq!(sobel_gradient(&img, 1, 0)?, ([30], [30]));
        assert_eq!(sobel_gradient(&img, 2, 0)?, ([-30], [30]));
        assert_eq!(sobel_gradient(&img, 0, 1)?, ([40], [0]));
        assert_eq!(sobel_gradient(&img, 2, 2)?, ([-30], [-30]));

        let mut edges = img.clone();
        sobel_edges(&mut edges)?;

        // sqrt(1000) = 31.6, sqrt(1800) = 42.4
        #[rustfmt::skip]
        assert_eq!(
            edges.as_slice(),
            &[
                32, 42, 42,
                40, 40, 40,
                32, 42, 42,
            ],
        );

        Ok(())
    }

    #[test]
    fn test_sobel_gradient_out_of_bounds() -> Result<(), FilterError> {
        let img = Image::<u8, 3>::from_size_val([2, 2].into(), 0)?;
        assert_eq!(
            sobel_gradient(&img, 2, 0),
            Err(ImageError::PixelIndexOutOfBounds(2, 0, 2, 2))
        );
        Ok(())
    }

    #[test]
    fn test_sobel_uniform_interior_is_zero() -> Result<(), FilterError> {
        let mut img = Image::<u8, 3>::from_size_val([4, 4].into(), 200)?;
        sobel_edges(&mut img)?;
        for y in 1..3 {
            for x in 1..3 {
                assert_eq!(img.pixel(x, y)?, Rgb8::BLACK);
            }
        }
        // the zero-filled border makes the frame light up
        assert_eq!(img.pixel(0, 0)?, Rgb8::WHITE);
        Ok(())
    }

    #[test]
    fn test_sobel_checkerboard_clamps() -> Result<(), FilterError> {
        let mut img = Image::from_pixels(
            [2, 2].into(),
            &[Rgb8::BLACK, Rgb8::WHITE, Rgb8::WHITE, Rgb8::BLACK],
        )?;
        sobel_edges(&mut img)?;
        assert!(img.as_slice().iter().all(|&v| v == 255));
        Ok(())
    }

    #[test]
    fn test_sobel_degenerate() -> Result<(), FilterError> {
        let mut single = Image::from_pixels([1, 1].into(), &[Rgb8::new(9, 99, 255)])?;
        sobel_edges(&mut single)?;
        assert_eq!(single.pixel(0, 0)?, Rgb8::BLACK);

        let mut row = Image::<u8, 1>::new([3, 1].into(), vec![10, 20, 30])?;
        sobel_edges(&mut row)?;
        assert_eq!(row.as_slice(), &[40, 40, 40]);

        let mut empty = Image::<u8, 3>::new([4, 0].into(), vec![])?;
        sobel_edges(&mut empty)?;
        box_blur(&mut empty)?;
        assert_eq!(empty.size(), [4, 0].into());
        Ok(())
    }
}
