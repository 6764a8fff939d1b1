//! Origin finding and re-centering of velocity-map images.
//!
//! Abel reconstruction assumes the image is symmetric about its central row
//! and column. This crate prepares raw detector images for that step:
//!
//! 1. [`preprocess`] optionally trims the image to an odd width and/or a
//!    square shape.
//! 2. [`find_origin`] estimates the physical origin with one of the
//!    [`OriginMethod`] strategies.
//! 3. [`set_center`] resamples the image so that the origin sits at the
//!    array center, under a [`CropPolicy`] that decides what is cropped and
//!    what is zero-padded.
//!
//! [`center_image`] runs all three in sequence.
//!
//! Coordinates are always `(row, column)`. Axis 0 is vertical, axis 1 is
//! horizontal.

pub mod center;
pub mod error;
pub mod origin;
pub mod preprocess;
pub mod set_center;
pub mod slices;
pub mod types;

pub use center::{center_image, CenterMethod, CenterOptions};
pub use error::CenterError;
pub use origin::{
    find_origin, find_origin_by_center_of_image, find_origin_by_center_of_mass,
    find_origin_by_convolution, find_origin_by_convolution_with_projections,
    find_origin_by_gaussian_fit, find_origin_by_slice, ConvolutionOrigin, OriginMethod,
    OriginOptions, SliceOptions,
};
pub use preprocess::preprocess;
pub use set_center::{set_center, DEFAULT_ORDER};
pub use slices::{axis_slices, AxisSlices};
pub use types::{Axes, CropPolicy, Origin};
