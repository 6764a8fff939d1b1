//! One-call centering: trim, locate the origin, re-center.

use log::debug;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CenterError;
use crate::origin::{find_origin, OriginMethod, OriginOptions};
use crate::preprocess::preprocess;
use crate::set_center::{set_center, DEFAULT_ORDER};
use crate::types::{Axes, CropPolicy, Origin};

/// How [`center_image`] obtains the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CenterMethod {
    /// Estimate the origin from the (trimmed) image
    Find(OriginMethod),
    /// Use a known origin
    Origin(Origin),
}

impl From<OriginMethod> for CenterMethod {
    fn from(method: OriginMethod) -> Self {
        CenterMethod::Find(method)
    }
}

impl From<Origin> for CenterMethod {
    fn from(origin: Origin) -> Self {
        CenterMethod::Origin(origin)
    }
}

impl From<(f64, f64)> for CenterMethod {
    fn from(origin: (f64, f64)) -> Self {
        CenterMethod::Origin(origin.into())
    }
}

impl FromStr for CenterMethod {
    type Err = CenterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<OriginMethod>().map(CenterMethod::Find)
    }
}

/// Options for [`center_image`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterOptions {
    /// Drop the last column of an image with an even column count
    pub odd_size: bool,
    /// Trim the longer dimension to make the image square
    pub square: bool,
    /// Axes to center
    pub axes: Axes,
    /// Output size policy
    pub crop: CropPolicy,
    /// Spline order for fractional origins
    pub order: usize,
    /// Options forwarded to the origin estimator
    pub origin: OriginOptions,
}

impl Default for CenterOptions {
    fn default() -> Self {
        Self {
            odd_size: true,
            square: false,
            axes: Axes::BOTH,
            crop: CropPolicy::MaintainSize,
            order: DEFAULT_ORDER,
            origin: OriginOptions::default(),
        }
    }
}

/// Center an image on its origin.
///
/// The image is first trimmed by [`preprocess`]. A [`CenterMethod::Find`]
/// origin is then estimated on the trimmed image, while a
/// [`CenterMethod::Origin`] is taken to be in trimmed-image coordinates.
/// Finally [`set_center`] moves the origin to the middle.
///
/// # Examples
/// ```
/// use ndarray::Array2;
/// use vmi_center::{center_image, CenterOptions, OriginMethod};
///
/// let mut image = Array2::<f64>::zeros((9, 9));
/// image[[3, 5]] = 1.0;
/// let centered =
///     center_image(image.view(), OriginMethod::Convolution, &CenterOptions::default()).unwrap();
/// assert_eq!(centered[[4, 4]], 1.0);
/// ```
pub fn center_image(
    image: ArrayView2<f64>,
    method: impl Into<CenterMethod>,
    options: &CenterOptions,
) -> Result<Array2<f64>, CenterError> {
    let trimmed = preprocess(image, options.odd_size, options.square);

    let origin = match method.into() {
        CenterMethod::Find(method) => Origin::from(find_origin(
            trimmed.view(),
            method,
            &options.origin,
        )?),
        CenterMethod::Origin(origin) => origin,
    };
    debug!("Centering on {origin}");

    set_center(
        trimmed.view(),
        origin,
        options.crop,
        options.axes,
        options.order,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::s;

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "com".parse::<CenterMethod>().unwrap(),
            CenterMethod::Find(OriginMethod::CenterOfMass)
        );
        assert!(matches!(
            "middle".parse::<CenterMethod>(),
            Err(CenterError::UnknownMethod(_))
        ));
    }

    #[test]
    fn test_known_origin_after_trimming() {
        let image = Array2::from_shape_fn((7, 8), |(r, c)| (r * 10 + c) as f64);
        let options = CenterOptions {
            crop: CropPolicy::ValidRegion,
            ..Default::default()
        };
        // odd_size drops column 7 first
        let out = center_image(image.view(), (2.0, 4.0), &options).unwrap();
        assert_eq!(out, image.slice(s![0..5, 2..7]));
    }

    #[test]
    fn test_default_options() {
        let options = CenterOptions::default();
        assert!(options.odd_size);
        assert!(!options.square);
        assert_eq!(options.axes, Axes::BOTH);
        assert_eq!(options.crop, CropPolicy::MaintainSize);
        assert_eq!(options.order, 3);
        assert_eq!(options.origin.slice.slice_width, 10);
    }
}
