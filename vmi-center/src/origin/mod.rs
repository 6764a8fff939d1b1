//! Origin estimation for velocity-map images.
//!
//! Five interchangeable strategies locate the (row, column) origin of an
//! image. All of them take the same [`OriginOptions`] bag and read only the
//! fields they use, so a single options value can be passed to whichever
//! method is selected at runtime.

mod center_of_mass;
mod convolution;
mod gaussian;
mod image_center;
mod slice;

pub use center_of_mass::find_origin_by_center_of_mass;
pub use convolution::{
    find_origin_by_convolution, find_origin_by_convolution_with_projections, ConvolutionOrigin,
};
pub use gaussian::find_origin_by_gaussian_fit;
pub use image_center::find_origin_by_center_of_image;
pub use slice::find_origin_by_slice;

use log::debug;
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CenterError;
use crate::types::Axes;

/// Signature shared by every origin estimator.
pub type Estimator = fn(ArrayView2<f64>, &OriginOptions) -> Result<(f64, f64), CenterError>;

/// Available origin finding strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginMethod {
    /// Geometric center of the array
    ImageCenter,
    /// Intensity-weighted centroid
    #[serde(rename = "com")]
    CenterOfMass,
    /// Peak of the autoconvolution of each projection
    Convolution,
    /// Gaussian fit to each projection
    Gaussian,
    /// Alignment of opposite slice profiles
    Slice,
}

/// Name, method and estimator for every strategy.
static METHODS: [(&str, OriginMethod, Estimator); 5] = [
    (
        "image_center",
        OriginMethod::ImageCenter,
        find_origin_by_center_of_image,
    ),
    ("com", OriginMethod::CenterOfMass, find_origin_by_center_of_mass),
    ("convolution", OriginMethod::Convolution, find_origin_by_convolution),
    ("gaussian", OriginMethod::Gaussian, find_origin_by_gaussian_fit),
    ("slice", OriginMethod::Slice, find_origin_by_slice),
];

impl OriginMethod {
    /// Every method, in registry order.
    pub const ALL: [OriginMethod; 5] = [
        OriginMethod::ImageCenter,
        OriginMethod::CenterOfMass,
        OriginMethod::Convolution,
        OriginMethod::Gaussian,
        OriginMethod::Slice,
    ];

    pub fn name(self) -> &'static str {
        self.entry().0
    }

    pub fn estimator(self) -> Estimator {
        self.entry().2
    }

    fn entry(self) -> &'static (&'static str, OriginMethod, Estimator) {
        // Every variant has exactly one registry row.
        &METHODS[self as usize]
    }
}

impl FromStr for OriginMethod {
    type Err = CenterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        METHODS
            .iter()
            .find(|(name, _, _)| *name == s)
            .map(|&(_, method, _)| method)
            .ok_or_else(|| CenterError::UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for OriginMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options for the slice-alignment estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceOptions {
    /// Number of rows (columns) summed into each profile
    pub slice_width: usize,
    /// `(rmin, rmax)` range of each profile compared; negative bounds count from the end
    pub radial_range: (isize, isize),
    /// Axes whose origin coordinate is estimated; others stay at the image center
    pub axes: Axes,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            slice_width: 10,
            radial_range: (0, -1),
            axes: Axes::BOTH,
        }
    }
}

/// Options understood by the origin estimators.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginOptions {
    /// Round the center-of-mass and Gaussian estimates to whole pixels
    pub round_output: bool,
    /// Settings for [`OriginMethod::Slice`]
    pub slice: SliceOptions,
}

/// Find the origin of `image` with the given method.
///
/// # Returns
/// `(row, column)` of the origin in absolute pixel coordinates.
pub fn find_origin(
    image: ArrayView2<f64>,
    method: OriginMethod,
    options: &OriginOptions,
) -> Result<(f64, f64), CenterError> {
    let origin = (method.estimator())(image, options)?;
    debug!("Origin by {method} at {origin:?}");
    Ok(origin)
}

/// Round half to even, matching the usual numeric convention for `.5` ties.
pub(crate) fn round_origin((row, col): (f64, f64)) -> (f64, f64) {
    (row.round_ties_even(), col.round_ties_even())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_registry_matches_variants() {
        for (index, method) in OriginMethod::ALL.iter().enumerate() {
            assert_eq!(METHODS[index].1, *method);
            assert_eq!(method.name().parse::<OriginMethod>().unwrap(), *method);
        }
    }

    #[test]
    fn test_unknown_method() {
        let err = "centroid".parse::<OriginMethod>().unwrap_err();
        assert!(matches!(err, CenterError::UnknownMethod(ref name) if name == "centroid"));
    }

    #[test]
    fn test_dispatch_uses_selected_estimator() {
        let mut image = Array2::<f64>::zeros((9, 11));
        image[[2, 7]] = 1.0;
        let options = OriginOptions::default();

        let center = find_origin(image.view(), OriginMethod::ImageCenter, &options).unwrap();
        assert_eq!(center, (4.0, 5.0));

        let com = find_origin(image.view(), OriginMethod::CenterOfMass, &options).unwrap();
        assert_eq!(com, (2.0, 7.0));
    }

    #[test]
    fn test_round_origin_ties_to_even() {
        assert_eq!(round_origin((2.5, 3.5)), (2.0, 4.0));
        assert_eq!(round_origin((2.4, -1.6)), (2.0, -2.0));
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: OriginOptions =
            serde_json::from_str(r#"{"slice": {"slice_width": 4, "axes": [1]}}"#).unwrap();
        assert!(!options.round_output);
        assert_eq!(options.slice.slice_width, 4);
        assert_eq!(options.slice.radial_range, (0, -1));
        assert_eq!(options.slice.axes, Axes::COLS);

        let bad = serde_json::from_str::<OriginOptions>(r#"{"slice": {"axes": [3]}}"#);
        assert!(bad.is_err());
    }
}
