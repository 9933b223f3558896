/// A single 8-bit RGB sample.
///
/// The channels are stored in `[red, green, blue]` order when the pixel is laid
/// out inside an [`Image<u8, 3>`](crate::Image).
///
/// # Examples
///
/// ```
/// use pixgrid_image::Rgb8;
///
/// let px = Rgb8::new(255, 0, 10);
/// assert_eq!(px.red, 255);
/// assert_eq!(<[u8; 3]>::from(px), [255, 0, 10]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Rgb8 {
    /// Black, all channels zero.
    pub const BLACK: Rgb8 = Rgb8::splat(0);

    /// White, all channels 255.
    pub const WHITE: Rgb8 = Rgb8::splat(255);

    /// Create a pixel from its three channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a pixel with the same value on every channel.
    pub const fn splat(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Whether all three channels hold the same value.
    pub fn is_gray(&self) -> bool {
        self.red == self.green && self.green == self.blue
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(px: [u8; 3]) -> Self {
        Self::new(px[0], px[1], px[2])
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(px: Rgb8) -> Self {
        [px.red, px.green, px.blue]
    }
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}
