//! Piecewise-linear interpolation on sorted samples.

use thiserror::Error;

/// Errors raised by [`interp`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpError {
    #[error("Value {0} is outside the sampled range [{1}, {2}]")]
    OutOfBounds(f64, f64, f64),
    #[error("At least 2 samples are required")]
    InsufficientData,
    #[error("Sample coordinates and values differ in length")]
    MismatchedLengths,
    #[error("Sample coordinates must be strictly ascending")]
    UnsortedData,
}

/// Linearly interpolate `ys` sampled at `xs` at the coordinate `x`.
///
/// `xs` must be strictly ascending. The enclosing interval is located by
/// binary search, so repeated queries on long tables stay cheap.
///
/// # Errors
///
/// * `InterpError::OutOfBounds` - `x` lies outside `[xs[0], xs[n-1]]`
/// * `InterpError::InsufficientData` - fewer than 2 samples
/// * `InterpError::MismatchedLengths` - `xs` and `ys` differ in length
/// * `InterpError::UnsortedData` - `xs` is not strictly ascending
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> Result<f64, InterpError> {
    if xs.len() != ys.len() {
        return Err(InterpError::MismatchedLengths);
    }
    if xs.len() < 2 {
        return Err(InterpError::InsufficientData);
    }
    if xs.windows(2).any(|w| !(w[1] > w[0])) {
        return Err(InterpError::UnsortedData);
    }

    let lo = xs[0];
    let hi = xs[xs.len() - 1];
    if !(lo..=hi).contains(&x) {
        return Err(InterpError::OutOfBounds(x, lo, hi));
    }

    let idx = match xs.binary_search_by(|probe| probe.total_cmp(&x)) {
        Ok(exact) => return Ok(ys[exact]),
        Err(insert) => insert,
    };

    let (x1, x2) = (xs[idx - 1], xs[idx]);
    let (y1, y2) = (ys[idx - 1], ys[idx]);
    let t = (x - x1) / (x2 - x1);
    Ok(y1 + t * (y2 - y1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_sample() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(interp(2.0, &xs, &ys).unwrap(), 20.0);
    }

    #[test]
    fn test_between_samples() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 1.0, 4.0, 9.0];
        assert_eq!(interp(1.5, &xs, &ys).unwrap(), 2.5);
        assert_eq!(interp(2.75, &xs, &ys).unwrap(), 7.75);
    }

    #[test]
    fn test_out_of_bounds() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [10.0, 20.0, 30.0];
        assert!(matches!(
            interp(0.5, &xs, &ys),
            Err(InterpError::OutOfBounds(_, _, _))
        ));
        assert!(matches!(
            interp(3.5, &xs, &ys),
            Err(InterpError::OutOfBounds(_, _, _))
        ));
    }

    #[test]
    fn test_bad_tables() {
        assert_eq!(
            interp(1.5, &[1.0, 2.0, 3.0], &[10.0, 20.0]),
            Err(InterpError::MismatchedLengths)
        );
        assert_eq!(
            interp(1.0, &[1.0], &[10.0]),
            Err(InterpError::InsufficientData)
        );
        assert_eq!(
            interp(1.5, &[2.0, 1.0, 3.0], &[20.0, 10.0, 30.0]),
            Err(InterpError::UnsortedData)
        );
    }
}
