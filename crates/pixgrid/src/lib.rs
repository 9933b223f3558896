#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use pixgrid_image as image;

#[doc(inline)]
pub use pixgrid_imgproc as imgproc;
