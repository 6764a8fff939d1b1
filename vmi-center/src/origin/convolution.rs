use log::trace;
use ndarray::{ArrayView2, Axis};
use vmi_math::{argmax_first, convolve_full};

use super::OriginOptions;
use crate::error::CenterError;

/// Origin together with the autoconvolved projections it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionOrigin {
    /// `(row, column)` origin
    pub origin: (f64, f64),
    /// Autoconvolution of the row projection (sum over columns)
    pub rows: Vec<f64>,
    /// Autoconvolution of the column projection (sum over rows)
    pub cols: Vec<f64>,
}

/// Origin at half the peak position of each projection's autoconvolution.
///
/// The autoconvolution of a profile symmetric about `x0` peaks at `2 * x0`.
/// Ties resolve to the first maximum.
pub fn find_origin_by_convolution(
    image: ArrayView2<f64>,
    _options: &OriginOptions,
) -> Result<(f64, f64), CenterError> {
    find_origin_by_convolution_with_projections(image).map(|found| found.origin)
}

/// Same as [`find_origin_by_convolution`] but also returns both autoconvolutions.
///
/// # Errors
/// * `CenterError::EmptyImage` - the image has no rows or no columns
pub fn find_origin_by_convolution_with_projections(
    image: ArrayView2<f64>,
) -> Result<ConvolutionOrigin, CenterError> {
    if image.is_empty() {
        return Err(CenterError::EmptyImage);
    }

    let row_profile = image.sum_axis(Axis(1)).to_vec();
    let col_profile = image.sum_axis(Axis(0)).to_vec();
    let rows = convolve_full(&row_profile, &row_profile);
    let cols = convolve_full(&col_profile, &col_profile);

    let peak = |conv: &[f64]| argmax_first(conv).ok_or(CenterError::EmptyImage);
    let origin = (peak(&rows)? as f64 / 2.0, peak(&cols)? as f64 / 2.0);
    trace!("Autoconvolution peaks give origin {origin:?}");

    Ok(ConvolutionOrigin { origin, rows, cols })
}
