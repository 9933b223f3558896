use pixgrid_image::Image;

use crate::error::FilterError;
use crate::parallel::ExecutionStrategy;
use crate::{color, filter, flip};

/// The filters that can be applied to an RGB8 image.
///
/// A filter can be parsed from its name or from its one-letter selector:
///
/// ```
/// use pixgrid_imgproc::Filter;
///
/// assert_eq!("blur".parse::<Filter>().unwrap(), Filter::Blur);
/// assert_eq!("e".parse::<Filter>().unwrap(), Filter::Edges);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Channel mean, see [`color::grayscale`].
    Grayscale,
    /// Horizontal mirror, see [`flip::horizontal_flip`].
    Reflect,
    /// 3x3 box blur, see [`filter::box_blur`].
    Blur,
    /// Sobel edge magnitude, see [`filter::sobel_edges`].
    Edges,
}

impl Filter {
    /// All filters, in selector order.
    pub const ALL: [Filter; 4] = [
        Filter::Grayscale,
        Filter::Reflect,
        Filter::Blur,
        Filter::Edges,
    ];

    /// The one-letter selector of the filter.
    pub fn selector(&self) -> char {
        match self {
            Filter::Grayscale => 'g',
            Filter::Reflect => 'r',
            Filter::Blur => 'b',
            Filter::Edges => 'e',
        }
    }

    /// Apply the filter in place with the default execution strategy.
    pub fn apply(self, image: &mut Image<u8, 3>) -> Result<(), FilterError> {
        self.apply_with(image, ExecutionStrategy::default())
    }

    /// Apply the filter in place with the given execution strategy.
    pub fn apply_with(
        self,
        image: &mut Image<u8, 3>,
        strategy: ExecutionStrategy,
    ) -> Result<(), FilterError> {
        match self {
            Filter::Grayscale => color::grayscale_with(image, strategy),
            Filter::Reflect => flip::horizontal_flip_with(image, strategy),
            Filter::Blur => filter::box_blur_with(image, strategy),
            Filter::Edges => filter::sobel_edges_with(image, strategy),
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "g" | "gray" | "grayscale" => Ok(Filter::Grayscale),
            "r" | "reflect" => Ok(Filter::Reflect),
            "b" | "blur" => Ok(Filter::Blur),
            "e" | "edges" => Ok(Filter::Edges),
            _ => Err(FilterError::InvalidFilter(s.to_string())),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Filter::Grayscale => "grayscale",
            Filter::Reflect => "reflect",
            Filter::Blur => "blur",
            Filter::Edges => "edges",
        };
        write!(f, "{name}")
    }
}
