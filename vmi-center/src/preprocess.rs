//! Odd-sizing and squaring of images ahead of centering.

use log::debug;
use ndarray::{s, Array2, ArrayView2};

/// Trim an image to odd width and/or square shape.
///
/// * `odd_size` - drop the last column when the column count is even
/// * `square` - trim the longer dimension symmetrically to match the shorter
///
/// When rows exceed columns, `diff / 2` rows are removed from each end and an
/// odd leftover row is removed from the end. When columns exceed rows, the
/// row count is first made odd (if `odd_size`) by dropping the last row, then
/// `(cols - rows) / 2` columns are removed from each side.
pub fn preprocess(image: ArrayView2<f64>, odd_size: bool, square: bool) -> Array2<f64> {
    let mut view = image;
    let cols = view.ncols();

    if odd_size && cols % 2 == 0 && cols > 0 {
        view = view.slice_move(s![.., ..cols - 1]);
    }

    let (rows, cols) = view.dim();
    if square && rows != cols {
        if rows > cols {
            let diff = rows - cols;
            let trim = diff / 2;
            view = view.slice_move(s![trim..rows - trim, ..]);
            if diff % 2 == 1 {
                let remaining = view.nrows();
                view = view.slice_move(s![..remaining - 1, ..]);
            }
        } else {
            let mut rows = rows;
            if odd_size && rows % 2 == 0 && rows > 0 {
                view = view.slice_move(s![..rows - 1, ..]);
                rows -= 1;
            }
            let trim = (cols - rows) / 2;
            view = view.slice_move(s![.., trim..cols - trim]);
        }
    }

    if view.dim() != image.dim() {
        debug!("Trimmed image from {:?} to {:?}", image.dim(), view.dim());
    }
    view.to_owned()
}
