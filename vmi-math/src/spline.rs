//! B-spline interpolated shifting of 1D and 2D arrays.
//!
//! Samples are treated as the knots of an interpolating B-spline of degree
//! 0 through 5. The interpolation coefficients are obtained with the usual
//! recursive prefilter under mirror boundary conditions, and the shifted
//! output is evaluated from them.
//!
//! Output samples whose source coordinate falls outside `[0, len - 1]` are
//! set to zero; no interpolation is performed beyond the edges. A shift by a
//! fractional amount therefore erases the partially covered edge sample.
//! Callers that need that content must zero-pad before shifting and crop
//! afterwards.
//!
//! A 2D shift is applied as independent 1D passes along each axis. Because
//! the shift is constant over the array this is identical to evaluating the
//! tensor-product spline, and an axis with a zero shift is copied verbatim.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use thiserror::Error;

/// Highest supported spline degree.
pub const MAX_SPLINE_ORDER: usize = 5;

/// Errors raised by [`shift`] and [`shift_1d`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShiftError {
    #[error("Spline order {0} is not supported (expected 0..=5)")]
    UnsupportedOrder(usize),
    #[error("Shift must be finite, got {0}")]
    NonFiniteShift(f64),
}

/// Shift a 2D array by `shift = [rows, cols]` pixels.
///
/// Positive shifts move content towards higher indices. Exposed regions are
/// filled with zeros.
///
/// # Arguments
/// * `input` - Array to resample
/// * `shift` - Per-axis shift in pixels, may be fractional
/// * `order` - Spline degree, 0 (nearest) through 5
///
/// # Errors
/// * `ShiftError::UnsupportedOrder` - `order` is above [`MAX_SPLINE_ORDER`]
/// * `ShiftError::NonFiniteShift` - a shift component is NaN or infinite
pub fn shift(
    input: ArrayView2<f64>,
    shift: [f64; 2],
    order: usize,
) -> Result<Array2<f64>, ShiftError> {
    validate_order(order)?;
    for s in shift {
        validate_shift(s)?;
    }

    let mut out = input.to_owned();
    for (axis, &s) in shift.iter().enumerate() {
        if s == 0.0 {
            continue;
        }
        let kernel = ShiftKernel::new(s, order);
        for mut lane in out.lanes_mut(Axis(axis)) {
            let shifted = kernel.apply(&lane.to_vec());
            lane.assign(&Array1::from(shifted));
        }
    }
    Ok(out)
}

/// Shift a 1D sequence by `shift` samples.
///
/// Same semantics as [`shift`] restricted to one axis.
pub fn shift_1d(input: &[f64], shift: f64, order: usize) -> Result<Vec<f64>, ShiftError> {
    validate_order(order)?;
    validate_shift(shift)?;
    if shift == 0.0 {
        return Ok(input.to_vec());
    }
    Ok(ShiftKernel::new(shift, order).apply(input))
}

fn validate_order(order: usize) -> Result<(), ShiftError> {
    if order > MAX_SPLINE_ORDER {
        return Err(ShiftError::UnsupportedOrder(order));
    }
    Ok(())
}

fn validate_shift(shift: f64) -> Result<(), ShiftError> {
    if !shift.is_finite() {
        return Err(ShiftError::NonFiniteShift(shift));
    }
    Ok(())
}

/// Precomputed evaluation weights for a constant shift.
///
/// For output index `i` the source coordinate is `x = i - shift`, so the
/// first contributing coefficient is `i + base` and the weights do not
/// depend on `i`.
struct ShiftKernel {
    shift: f64,
    order: usize,
    base: isize,
    weights: Vec<f64>,
}

impl ShiftKernel {
    fn new(shift: f64, order: usize) -> Self {
        let half = (order / 2) as isize;
        let base = if order % 2 == 1 {
            (-shift).floor() as isize - half
        } else {
            (-shift + 0.5).floor() as isize - half
        };
        let weights = (0..=order)
            .map(|j| bspline(order, -shift - (base + j as isize) as f64))
            .collect();
        Self {
            shift,
            order,
            base,
            weights,
        }
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        let n = input.len();
        let mut coeffs = input.to_vec();
        prefilter(&mut coeffs, self.order);

        let last = n as f64 - 1.0;
        (0..n)
            .map(|i| {
                let x = i as f64 - self.shift;
                if x < 0.0 || x > last {
                    return 0.0;
                }
                let start = i as isize + self.base;
                self.weights
                    .iter()
                    .enumerate()
                    .map(|(j, w)| w * coeffs[mirror_index(start + j as isize, n)])
                    .sum()
            })
            .collect()
    }
}

/// Centered B-spline of degree `order` evaluated at `t`.
fn bspline(order: usize, t: f64) -> f64 {
    if order == 0 {
        return if (-0.5..0.5).contains(&t) { 1.0 } else { 0.0 };
    }
    let n = order as f64;
    let half = (n + 1.0) / 2.0;
    if t.abs() >= half {
        return 0.0;
    }
    ((t + half) * bspline(order - 1, t + 0.5) + (half - t) * bspline(order - 1, t - 0.5)) / n
}

fn spline_poles(order: usize) -> Vec<f64> {
    match order {
        2 => vec![8f64.sqrt() - 3.0],
        3 => vec![3f64.sqrt() - 2.0],
        4 => vec![
            (664.0 - 438976f64.sqrt()).sqrt() + 304f64.sqrt() - 19.0,
            (664.0 + 438976f64.sqrt()).sqrt() - 304f64.sqrt() - 19.0,
        ],
        5 => vec![
            (67.5 - 4436.25f64.sqrt()).sqrt() + 26.25f64.sqrt() - 6.5,
            (67.5 + 4436.25f64.sqrt()).sqrt() - 26.25f64.sqrt() - 6.5,
        ],
        _ => Vec::new(),
    }
}

/// Convert samples into interpolating spline coefficients in place.
fn prefilter(coeffs: &mut [f64], order: usize) {
    let n = coeffs.len();
    if order < 2 || n < 2 {
        return;
    }

    let poles = spline_poles(order);
    let gain: f64 = poles.iter().map(|&z| (1.0 - z) * (1.0 - 1.0 / z)).product();
    coeffs.iter_mut().for_each(|c| *c *= gain);

    for &z in &poles {
        coeffs[0] = causal_initial(coeffs, z);
        for k in 1..n {
            coeffs[k] += z * coeffs[k - 1];
        }
        coeffs[n - 1] = (z / (z * z - 1.0)) * (z * coeffs[n - 2] + coeffs[n - 1]);
        for k in (0..n - 1).rev() {
            coeffs[k] = z * (coeffs[k + 1] - coeffs[k]);
        }
    }
}

/// Initial value of the causal recursion for a mirror-extended signal.
fn causal_initial(coeffs: &[f64], z: f64) -> f64 {
    let n = coeffs.len();
    let iz = 1.0 / z;
    let mut zn = z;
    let mut z2n = z.powi(n as i32 - 1);
    let mut sum = coeffs[0] + z2n * coeffs[n - 1];
    z2n *= z2n * iz;
    for &c in &coeffs[1..n - 1] {
        sum += (zn + z2n) * c;
        zn *= z;
        z2n *= iz;
    }
    sum / (1.0 - zn * zn)
}

/// Reflect an index about the first and last sample (no edge repetition).
fn mirror_index(k: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let k = k.rem_euclid(period);
    if k >= n as isize {
        (period - k) as usize
    } else {
        k as usize
    }
}
