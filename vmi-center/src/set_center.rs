//! Re-centering of an image on a given origin.
//!
//! The output is arranged so that the origin lands on the array center
//! `(len - 1) / 2` of every active axis. How much of the input survives is
//! governed by a [`CropPolicy`]:
//!
//! - **MaintainSize**: the input shape is kept and content moves under it
//! - **ValidRegion**: the largest crop symmetric about the origin
//! - **MaintainData**: zero padding so that every input sample is kept
//!
//! Fractional origins are handled with a B-spline shift. The spline shift
//! zeroes any output sample whose source lies past the array edge, so the
//! input is always padded by one zero pixel before shifting and the padding
//! is removed afterwards.

use log::debug;
use ndarray::{s, Array2, ArrayView2, Axis, CowArray, Ix2};
use std::ops::Range;
use vmi_math::{shift, MAX_SPLINE_ORDER};

use crate::error::CenterError;
use crate::types::{Axes, CropPolicy, Origin};

/// Default spline order for fractional origins.
pub const DEFAULT_ORDER: usize = 3;

/// Largest origin coordinate magnitude, after wrapping negative values.
/// Every whole pixel count up to here is exact in an `f64`.
pub const MAX_COORDINATE: f64 = 4_503_599_627_370_496.0;

/// Origin on one active axis, split into whole and fractional pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisOrigin {
    whole: isize,
    fraction: f64,
    /// Same position counted from the far edge
    mirror: isize,
}

impl AxisOrigin {
    fn new(axis: usize, coord: f64, len: usize, order: usize) -> Result<Self, CenterError> {
        if !coord.is_finite() {
            return Err(CenterError::NonFiniteOrigin { axis, value: coord });
        }
        let coord = if coord < 0.0 {
            coord + len as f64
        } else {
            coord
        };
        if coord.abs() > MAX_COORDINATE {
            return Err(CenterError::OriginOutOfRange { axis, value: coord });
        }
        let (whole, fraction) = if order > 0 {
            let whole = coord.trunc();
            (whole, coord - whole)
        } else {
            (coord.round_ties_even(), 0.0)
        };
        let whole = whole as isize;
        Ok(Self {
            whole,
            fraction,
            mirror: len as isize - 1 - whole,
        })
    }
}

type ActiveAxes = [Option<AxisOrigin>; 2];

/// Move `origin` of `data` to the image center.
///
/// Only axes that are both listed in `axes` and have a coordinate in
/// `origin` are touched; the other axis passes through unchanged. Negative
/// coordinates count from the far edge. When every active coordinate is a
/// whole number the shift is done by copying and `order` is ignored.
///
/// # Arguments
/// * `data` - Input image, left unmodified
/// * `origin` - `(row, column)` to move to the center
/// * `crop` - Output size policy
/// * `axes` - Axes to center
/// * `order` - Spline order 0..=5 for fractional origins, see [`DEFAULT_ORDER`]
///
/// # Errors
/// * `CenterError::InvalidOrder` - `order` is above 5
/// * `CenterError::NonFiniteOrigin` - an active coordinate is NaN or infinite
/// * `CenterError::OriginOutOfRange` - an active coordinate is beyond [`MAX_COORDINATE`]
/// * `CenterError::OutputTooLarge` - the padded output cannot be allocated
/// * `CenterError::EmptyImage` - `data` has no rows or no columns
pub fn set_center(
    data: ArrayView2<f64>,
    origin: Origin,
    crop: CropPolicy,
    axes: Axes,
    order: usize,
) -> Result<Array2<f64>, CenterError> {
    if order > MAX_SPLINE_ORDER {
        return Err(CenterError::InvalidOrder(order));
    }
    if data.is_empty() {
        return Err(CenterError::EmptyImage);
    }

    let shape = [data.nrows(), data.ncols()];
    let mut active: ActiveAxes = [None, None];
    for axis in axes.iter() {
        if let Some(coord) = origin.get(axis) {
            active[axis] = Some(AxisOrigin::new(axis, coord, shape[axis], order)?);
        }
    }

    let order = if active.iter().flatten().all(|a| a.fraction == 0.0) {
        0
    } else {
        order
    };
    debug!(
        "Centering {:?} image on {origin} with {crop}, order {order}",
        data.dim()
    );

    let out = match crop {
        CropPolicy::MaintainSize => maintain_size(data, &active, order)?,
        CropPolicy::ValidRegion => {
            let (aligned, active) = align_subpixel(data, active, crop, order)?;
            valid_region(aligned.view(), &active)
        }
        CropPolicy::MaintainData => {
            let (aligned, active) = align_subpixel(data, active, crop, order)?;
            maintain_data(aligned.view(), &active)?
        }
    };

    debug!("Centered image has shape {:?}", out.dim());
    Ok(out)
}

fn maintain_size(
    data: ArrayView2<f64>,
    active: &ActiveAxes,
    order: usize,
) -> Result<Array2<f64>, CenterError> {
    let shape = [data.nrows(), data.ncols()];
    let center = shape.map(|len| (len as isize - 1).div_euclid(2));

    if order > 0 {
        let mut delta = [0.0; 2];
        for (axis, a) in active.iter().enumerate() {
            if let Some(a) = a {
                delta[axis] = center[axis] as f64 - (a.whole as f64 + a.fraction);
            }
        }
        let shifted = shift(pad(data, [(1, 1), (1, 1)])?.view(), delta, order)?;
        let (rows, cols) = shifted.dim();
        return Ok(shifted.slice_move(s![1..rows - 1, 1..cols - 1]));
    }

    let mut src = [0..shape[0], 0..shape[1]];
    let mut dst = src.clone();
    for (axis, a) in active.iter().enumerate() {
        let Some(a) = a else { continue };
        let len = shape[axis];
        let delta = center[axis] - a.whole;
        // Shifts of a full axis or more leave nothing to copy.
        let dpos = (delta.max(0) as usize).min(len);
        let dneg = ((-delta).max(0) as usize).min(len);
        src[axis] = dneg..len - dpos;
        dst[axis] = dpos..len - dneg;
    }
    debug!("Whole-pixel copy from {src:?} to {dst:?}");

    let [src_rows, src_cols] = src;
    let [dst_rows, dst_cols] = dst;
    let mut out = Array2::zeros(data.raw_dim());
    out.slice_mut(s![dst_rows, dst_cols])
        .assign(&data.slice(s![src_rows, src_cols]));
    Ok(out)
}

/// Shift out the fractional part of the origin ahead of cropping or padding.
///
/// Returns the working image and the origins updated to index into it.
fn align_subpixel<'a>(
    data: ArrayView2<'a, f64>,
    mut active: ActiveAxes,
    crop: CropPolicy,
    order: usize,
) -> Result<(CowArray<'a, f64, Ix2>, ActiveAxes), CenterError> {
    if order == 0 {
        return Ok((CowArray::from(data), active));
    }

    let fraction = |a: &Option<AxisOrigin>| a.map_or(0.0, |a| a.fraction);
    let delta = [-fraction(&active[0]), -fraction(&active[1])];
    debug!("Subpixel shift by {delta:?}");

    let shifted = shift(pad(data, [(1, 1), (1, 1)])?.view(), delta, order)?;
    let (rows, cols) = shifted.dim();
    let shifted = shifted.slice_move(s![..rows - 1, ..cols - 1]);

    let mut keep: [Range<usize>; 2] = [0..0, 0..0];
    for (axis, kept) in keep.iter_mut().enumerate() {
        let len = shifted.len_of(Axis(axis));
        *kept = match active[axis].as_mut() {
            Some(a) if a.fraction != 0.0 => {
                if crop == CropPolicy::ValidRegion {
                    // Both partially covered edge pixels go.
                    a.mirror -= 1;
                    1..len - 1
                } else {
                    a.whole += 1;
                    0..len
                }
            }
            _ => 1..len,
        };
    }

    let [rows, cols] = keep;
    Ok((CowArray::from(shifted.slice_move(s![rows, cols])), active))
}

fn valid_region(data: ArrayView2<f64>, active: &ActiveAxes) -> Array2<f64> {
    let mut keep = [0..data.nrows(), 0..data.ncols()];
    for (axis, a) in active.iter().enumerate() {
        let Some(a) = a else { continue };
        let d = a.whole.min(a.mirror);
        keep[axis] = if d < 0 {
            0..0
        } else {
            (a.whole - d) as usize..(a.whole + d + 1) as usize
        };
    }
    let [rows, cols] = keep;
    data.slice(s![rows, cols]).to_owned()
}

fn maintain_data(
    data: ArrayView2<f64>,
    active: &ActiveAxes,
) -> Result<Array2<f64>, CenterError> {
    let mut widths = [(0, 0); 2];
    for (axis, a) in active.iter().enumerate() {
        let Some(a) = a else { continue };
        let d = a.whole.max(a.mirror);
        widths[axis] = ((d - a.whole) as usize, (d - a.mirror) as usize);
    }
    pad(data, widths)
}

/// Zero-pad `data` by `(before, after)` samples on each axis.
fn pad(
    data: ArrayView2<f64>,
    widths: [(usize, usize); 2],
) -> Result<Array2<f64>, CenterError> {
    let (rows, cols) = data.dim();
    let [(top, bottom), (left, right)] = widths;
    let too_large = || CenterError::OutputTooLarge {
        rows: top.saturating_add(rows).saturating_add(bottom),
        cols: left.saturating_add(cols).saturating_add(right),
    };

    let out_rows = top
        .checked_add(rows)
        .and_then(|n| n.checked_add(bottom))
        .ok_or_else(too_large)?;
    let out_cols = left
        .checked_add(cols)
        .and_then(|n| n.checked_add(right))
        .ok_or_else(too_large)?;
    let count = out_rows.checked_mul(out_cols).ok_or_else(too_large)?;

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(count)
        .map_err(|_| too_large())?;
    buffer.resize(count, 0.0);
    let mut out =
        Array2::from_shape_vec((out_rows, out_cols), buffer).map_err(|_| too_large())?;
    out.slice_mut(s![top..top + rows, left..left + cols])
        .assign(&data);
    Ok(out)
}
