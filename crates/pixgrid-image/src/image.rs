use crate::error::ImageError;
use crate::pixel::Rgb8;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use pixgrid_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Whether the size has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl From<ImageSize> for [u32; 2] {
    fn from(size: ImageSize) -> Self {
        [size.width as u32, size.height as u32]
    }
}

/// Represents an image with pixel data.
///
/// The pixel data is an owned, row-major buffer of `height * width * CHANNELS`
/// elements laid out as (H, W, C). The buffer length always matches the size;
/// this is checked once when the image is built.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixgrid_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        // check if the data length matches the image size
        let expected = size.area() * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The default value of the pixel data.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixgrid_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///     height: 20,
    ///   }, 0u8).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.area() * CHANNELS];
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Number of elements in one row of the buffer, `width * CHANNELS`.
    pub fn row_stride(&self) -> usize {
        self.width() * CHANNELS
    }

    /// Offset of the first channel of the pixel at (`row`, `col`) in the buffer.
    ///
    /// The offset is `(row * width + col) * CHANNELS`. Bounds are not checked
    /// here; callers must ensure `row < height` and `col < width`.
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        (row * self.width() + col) * CHANNELS
    }

    /// Get the pixel data as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get the value of a channel of a pixel.
    ///
    /// # Arguments
    ///
    /// * `x` - The column of the pixel.
    /// * `y` - The row of the pixel.
    /// * `ch` - The channel index.
    ///
    /// # Errors
    ///
    /// If the coordinates or the channel are out of bounds, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<T, ImageError>
    where
        T: Copy,
    {
        self.check_bounds(x, y, ch)?;
        Ok(self.data[self.offset(y, x) + ch])
    }

    /// Set the value of a channel of a pixel.
    ///
    /// # Arguments
    ///
    /// * `x` - The column of the pixel.
    /// * `y` - The row of the pixel.
    /// * `ch` - The channel index.
    /// * `val` - The new value.
    pub fn set_pixel(&mut self, x: usize, y: usize, ch: usize, val: T) -> Result<(), ImageError> {
        self.check_bounds(x, y, ch)?;
        let idx = self.offset(y, x) + ch;
        self.data[idx] = val;
        Ok(())
    }

    /// Take a full copy of the image to be used as a read-only source.
    ///
    /// Unlike [`Clone::clone`], the buffer is reserved with
    /// [`Vec::try_reserve_exact`] so that running out of memory is reported as
    /// [`ImageError::AllocationFailed`] instead of aborting the process.
    pub fn snapshot(&self) -> Result<Self, ImageError>
    where
        T: Copy,
    {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())
            .map_err(|_| ImageError::AllocationFailed(self.data.len()))?;
        data.extend_from_slice(&self.data);

        Ok(Self {
            size: self.size,
            data,
        })
    }

    fn check_bounds(&self, x: usize, y: usize, ch: usize) -> Result<(), ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        Ok(())
    }
}

impl Image<u8, 3> {
    /// Create an RGB image from a row-major list of pixels.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixgrid_image::{Image, ImageSize, Rgb8};
    ///
    /// let image = Image::from_pixels(
    ///     ImageSize { width: 2, height: 1 },
    ///     &[Rgb8::new(1, 2, 3), Rgb8::new(4, 5, 6)],
    /// ).unwrap();
    ///
    /// assert_eq!(image.as_slice(), &[1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn from_pixels(size: ImageSize, pixels: &[Rgb8]) -> Result<Self, ImageError> {
        if pixels.len() != size.area() {
            return Err(ImageError::InvalidChannelShape(
                pixels.len() * 3,
                size.area() * 3,
            ));
        }

        let data = pixels
            .iter()
            .flat_map(|&px| <[u8; 3]>::from(px))
            .collect();

        Image::new(size, data)
    }

    /// Get the pixel at column `x` and row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Result<Rgb8, ImageError> {
        self.check_bounds(x, y, 0)?;
        let idx = self.offset(y, x);
        Ok(Rgb8::new(
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
        ))
    }

    /// Overwrite the pixel at column `x` and row `y`.
    pub fn put_pixel(&mut self, x: usize, y: usize, px: Rgb8) -> Result<(), ImageError> {
        self.check_bounds(x, y, 0)?;
        let idx = self.offset(y, x);
        self.data[idx..idx + 3].copy_from_slice(&<[u8; 3]>::from(px));
        Ok(())
    }

    /// Collect the image into a row-major list of pixels.
    pub fn to_pixels(&self) -> Vec<Rgb8> {
        self.data
            .chunks_exact(3)
            .map(|px| Rgb8::new(px[0], px[1], px[2]))
            .collect()
    }
}
