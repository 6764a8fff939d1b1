use log::debug;
use ndarray::ArrayView2;
use vmi_math::{minimize_bounded, shift_1d, MinimizeOptions, MinimizeResult};

use super::OriginOptions;
use crate::error::CenterError;
use crate::slices::axis_slices;

/// Search interval for the profile alignment shift, in pixels.
const SHIFT_BOUNDS: (f64, f64) = (-50.0, 50.0);
const INITIAL_SHIFT: f64 = 0.1;
const TOLERANCE: f64 = 0.1;
/// Cubic spline for the profile shift.
const PROFILE_ORDER: usize = 3;

/// Origin that makes opposite slice profiles line up.
///
/// For each requested axis the two opposing profiles from
/// [`axis_slices`] are aligned by a bounded sub-pixel shift. Half of that
/// shift is the origin offset from `(rows / 2, cols / 2)`. Axes not listed
/// in `options.slice.axes` keep the plain center coordinate.
///
/// # Errors
/// * `CenterError::SliceFit` - the minimizer did not converge on a requested axis
pub fn find_origin_by_slice(
    image: ArrayView2<f64>,
    options: &OriginOptions,
) -> Result<(f64, f64), CenterError> {
    let settings = &options.slice;
    let (rows, cols) = image.dim();
    let slices = axis_slices(image, settings.radial_range, settings.slice_width);

    let mut offset = [0.0, 0.0];
    for axis in settings.axes.iter() {
        let (near, far) = if axis == 0 {
            (&slices.top, &slices.bottom)
        } else {
            (&slices.left, &slices.right)
        };
        let fit = align_profiles(near, far);
        if !fit.success {
            return Err(CenterError::SliceFit { axis, fit });
        }
        debug!(
            "Slice alignment on axis {axis}: shift {:.4} after {} iterations",
            fit.x, fit.iterations
        );
        offset[axis] = -fit.x / 2.0;
    }

    Ok((
        (rows / 2) as f64 - offset[0],
        (cols / 2) as f64 - offset[1],
    ))
}

/// Minimize the squared difference between two profiles over a relative shift.
fn align_profiles(near: &[f64], far: &[f64]) -> MinimizeResult {
    let objective = |s: f64| misalignment(s, near, far);
    minimize_bounded(
        objective,
        INITIAL_SHIFT,
        SHIFT_BOUNDS,
        &MinimizeOptions::with_tolerance(TOLERANCE),
    )
}

/// Sum of squared differences with one profile moved toward the center.
///
/// A negative `s` moves `near` by `s`; otherwise `far` is moved by `-s`.
fn misalignment(s: f64, near: &[f64], far: &[f64]) -> f64 {
    let shifted = if s < 0.0 {
        shift_1d(near, s, PROFILE_ORDER).map(|moved| (moved, far.to_vec()))
    } else {
        shift_1d(far, -s, PROFILE_ORDER).map(|moved| (near.to_vec(), moved))
    };
    match shifted {
        Ok((a, b)) => a.iter().zip(&b).map(|(x, y)| (x - y).powi(2)).sum(),
        Err(_) => f64::NAN,
    }
}
