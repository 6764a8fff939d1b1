use log::trace;
use ndarray::ArrayView2;

use super::{round_origin, OriginOptions};
use crate::error::CenterError;

/// Intensity-weighted centroid of the whole image.
///
/// With `round_output` the result is rounded to whole pixels.
///
/// # Errors
/// * `CenterError::ZeroIntensity` - the total intensity is zero or not finite
pub fn find_origin_by_center_of_mass(
    image: ArrayView2<f64>,
    options: &OriginOptions,
) -> Result<(f64, f64), CenterError> {
    let mut total = 0.0;
    let mut row_moment = 0.0;
    let mut col_moment = 0.0;
    for ((r, c), &value) in image.indexed_iter() {
        total += value;
        row_moment += r as f64 * value;
        col_moment += c as f64 * value;
    }

    if total == 0.0 || !total.is_finite() {
        return Err(CenterError::ZeroIntensity);
    }

    let origin = (row_moment / total, col_moment / total);
    trace!("Center of mass at {origin:?}");
    if options.round_output {
        Ok(round_origin(origin))
    } else {
        Ok(origin)
    }
}
