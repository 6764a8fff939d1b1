use log::trace;
use ndarray::{ArrayView2, Axis};
use vmi_math::fit_gaussian;

use super::{round_origin, OriginOptions};
use crate::error::CenterError;

/// Origin from Gaussian fits to the row and column projections.
///
/// The column coordinate is the fitted center of the sum over rows and the
/// row coordinate the fitted center of the sum over columns. With
/// `round_output` the result is rounded to whole pixels.
///
/// # Errors
/// * `CenterError::EmptyImage` - the image has no rows or no columns
/// * `CenterError::GaussianFit` - either fit failed
pub fn find_origin_by_gaussian_fit(
    image: ArrayView2<f64>,
    options: &OriginOptions,
) -> Result<(f64, f64), CenterError> {
    if image.is_empty() {
        return Err(CenterError::EmptyImage);
    }

    let col_fit = fit_gaussian(&image.sum_axis(Axis(0)).to_vec())?;
    let row_fit = fit_gaussian(&image.sum_axis(Axis(1)).to_vec())?;
    trace!("Gaussian fits: rows {row_fit:?}, cols {col_fit:?}");

    let origin = (row_fit.center, col_fit.center);
    if options.round_output {
        Ok(round_origin(origin))
    } else {
        Ok(origin)
    }
}
