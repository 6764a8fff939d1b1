//! Error type shared by origin finding and re-centering.

use thiserror::Error;
use vmi_math::{FitError, MinimizeResult, ShiftError};

/// Errors that can occur while finding an origin or re-centering an image.
///
/// Every failure is terminal for the call that produced it; no partial
/// output is returned.
#[derive(Error, Debug)]
pub enum CenterError {
    #[error(
        "Unknown origin method \"{0}\" (expected image_center, com, convolution, gaussian or slice)"
    )]
    UnknownMethod(String),

    #[error("Invalid crop option \"{0}\" (expected maintain_size, valid_region or maintain_data)")]
    InvalidCrop(String),

    #[error("Invalid axis {0} (expected 0 or 1)")]
    InvalidAxis(usize),

    #[error("Interpolation order {0} is out of range 0..=5")]
    InvalidOrder(usize),

    #[error("Origin coordinate on axis {axis} is not finite: {value}")]
    NonFiniteOrigin { axis: usize, value: f64 },

    #[error("Origin coordinate on axis {axis} is out of range: {value}")]
    OriginOutOfRange { axis: usize, value: f64 },

    #[error("Centered image of shape {rows}x{cols} cannot be allocated")]
    OutputTooLarge { rows: usize, cols: usize },

    #[error("Image is empty")]
    EmptyImage,

    #[error("Image has no finite non-zero total intensity")]
    ZeroIntensity,

    #[error("Slice alignment failed on axis {axis}: {}", .fit.message)]
    SliceFit { axis: usize, fit: MinimizeResult },

    #[error("Gaussian fit failed: {0}")]
    GaussianFit(#[from] FitError),

    #[error(transparent)]
    Shift(#[from] ShiftError),
}
