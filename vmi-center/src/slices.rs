//! Axial slice profiles running outward from the image center.

use ndarray::{s, ArrayView2, Axis};
use std::ops::Range;

/// Four intensity profiles taken through the image center.
///
/// Index 0 of every profile is at the image center and increasing index
/// moves outward, so opposite profiles of a symmetric image coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSlices {
    pub top: Vec<f64>,
    pub bottom: Vec<f64>,
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

/// Extract vertical and horizontal slice profiles summed across `slice_width`.
///
/// The image is split at `rows / 2 + rows % 2` and `cols / 2 + cols % 2`;
/// for odd sizes the central row (column) belongs to both halves. Each
/// strip is `slice_width` wide, centered on the opposite axis and clipped to
/// the image. Profiles are truncated to `radial_range = (rmin, rmax)`, where
/// negative bounds count from the end of the profile.
pub fn axis_slices(
    image: ArrayView2<f64>,
    radial_range: (isize, isize),
    slice_width: usize,
) -> AxisSlices {
    let (rows, cols) = image.dim();
    let r2 = rows / 2 + rows % 2;
    let c2 = cols / 2 + cols % 2;
    let sw2 = slice_width / 2;

    let col_band = c2.saturating_sub(sw2)..(c2 + sw2).min(cols);
    let row_band = r2.saturating_sub(sw2)..(r2 + sw2).min(rows);

    let top = image.slice(s![..r2, col_band.clone()]).sum_axis(Axis(1));
    let bottom = image
        .slice(s![r2 - rows % 2.., col_band])
        .sum_axis(Axis(1));
    let left = image.slice(s![row_band.clone(), ..c2]).sum_axis(Axis(0));
    let right = image
        .slice(s![row_band, c2 - cols % 2..])
        .sum_axis(Axis(0));

    let outward = |profile: Vec<f64>, reverse: bool| {
        let mut profile = profile;
        if reverse {
            profile.reverse();
        }
        let range = radial_bounds(radial_range, profile.len());
        profile[range].to_vec()
    };

    AxisSlices {
        top: outward(top.to_vec(), true),
        bottom: outward(bottom.to_vec(), false),
        left: outward(left.to_vec(), true),
        right: outward(right.to_vec(), false),
    }
}

/// Resolve `(start, end)` against a sequence of `len` samples.
///
/// Negative bounds count from the end, out-of-range bounds are clamped and
/// an inverted range is empty.
pub(crate) fn radial_bounds((start, end): (isize, isize), len: usize) -> Range<usize> {
    let resolve = |bound: isize| -> usize {
        if bound < 0 {
            (len as isize + bound).max(0) as usize
        } else {
            (bound as usize).min(len)
        }
    };
    let (start, end) = (resolve(start), resolve(end));
    if start >= end {
        start..start
    } else {
        start..end
    }
}
