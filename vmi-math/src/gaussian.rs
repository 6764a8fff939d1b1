//! Least-squares fit of a 1D Gaussian with constant baseline.
//!
//! The model is
//!
//! `y(x) = amplitude * exp(-(x - center)^2 / (2 sigma^2)) + offset`
//!
//! sampled at `x = 0, 1, ..., n - 1`. An initial estimate is read off the
//! data (baseline from the end points, peak at the first maximum, width from
//! the half-maximum crossings) and refined with Levenberg-Marquardt.

use log::debug;
use nalgebra::{Matrix4, Vector4};
use thiserror::Error;

use crate::convolve::argmax_first;
use crate::interp::interp;

/// Ratio between full width at half maximum and sigma.
const FWHM_PER_SIGMA: f64 = 2.354_820_045_030_949;

const MAX_ITERATIONS: usize = 200;
const MAX_DAMPING: f64 = 1e12;

/// Errors raised by [`fit_gaussian`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("insufficient data: expected at least {expected} samples, got {got}")]
    InsufficientData { expected: usize, got: usize },
    #[error("data contains NaN or infinite samples")]
    NonFiniteData,
    #[error("normal equations are singular")]
    Singular,
    #[error("fit did not converge within {iterations} iterations")]
    NotConverged { iterations: usize },
}

/// Parameters of a fitted Gaussian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianParams {
    /// Peak height above the baseline
    pub amplitude: f64,
    /// Peak location in sample coordinates
    pub center: f64,
    /// Standard deviation in samples (always non-negative)
    pub sigma: f64,
    /// Constant baseline
    pub offset: f64,
}

impl GaussianParams {
    /// Parameters as `[amplitude, center, sigma, offset]`.
    pub fn params(&self) -> [f64; 4] {
        [self.amplitude, self.center, self.sigma, self.offset]
    }

    /// Evaluate the model at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        gaussian(x, self.amplitude, self.center, self.sigma, self.offset)
    }

    fn from_vector(p: &Vector4<f64>) -> Self {
        Self {
            amplitude: p[0],
            center: p[1],
            sigma: p[2].abs(),
            offset: p[3],
        }
    }
}

/// Gaussian with baseline evaluated at `x`.
pub fn gaussian(x: f64, amplitude: f64, center: f64, sigma: f64, offset: f64) -> f64 {
    amplitude * (-(x - center).powi(2) / (2.0 * sigma * sigma)).exp() + offset
}

/// Fit a Gaussian to evenly spaced samples.
///
/// # Arguments
/// * `data` - Sample values at `x = 0..data.len()`
///
/// # Errors
/// * `FitError::InsufficientData` - fewer than 4 samples
/// * `FitError::NonFiniteData` - a sample is NaN or infinite
/// * `FitError::Singular` - the normal equations could not be solved
/// * `FitError::NotConverged` - the iteration cap was reached
pub fn fit_gaussian(data: &[f64]) -> Result<GaussianParams, FitError> {
    if data.len() < 4 {
        return Err(FitError::InsufficientData {
            expected: 4,
            got: data.len(),
        });
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(FitError::NonFiniteData);
    }

    let guess = initial_guess(data);
    debug!("Gaussian initial guess {:?}", guess.params());

    let mut p = Vector4::new(guess.amplitude, guess.center, guess.sigma, guess.offset);
    let mut cost = sum_of_squares(data, &p);
    let mut lambda = 1e-3;

    for iteration in 0..MAX_ITERATIONS {
        if cost == 0.0 {
            return Ok(GaussianParams::from_vector(&p));
        }

        let (jtj, jtr) = normal_equations(data, &p);

        let (step, trial_cost) = loop {
            let mut damped = jtj;
            for k in 0..4 {
                damped[(k, k)] += lambda * jtj[(k, k)].max(1e-12);
            }
            if let Some(step) = damped.lu().solve(&jtr) {
                let trial = p + step;
                let trial_cost = sum_of_squares(data, &trial);
                if trial_cost.is_finite() && trial_cost < cost {
                    lambda = (lambda / 10.0).max(1e-12);
                    break (step, trial_cost);
                }
            }
            lambda *= 10.0;
            if lambda > MAX_DAMPING {
                // No direction reduces the residual any further.
                if p.iter().all(|v| v.is_finite()) && p[2] != 0.0 {
                    debug!("Gaussian fit stalled after {iteration} iterations");
                    return Ok(GaussianParams::from_vector(&p));
                }
                return Err(FitError::Singular);
            }
        };

        p += step;
        let improvement = cost - trial_cost;
        cost = trial_cost;

        if improvement <= 1e-12 * cost || step.norm() <= 1e-10 * (p.norm() + 1e-10) {
            debug!("Gaussian fit converged after {} iterations", iteration + 1);
            return Ok(GaussianParams::from_vector(&p));
        }
    }

    Err(FitError::NotConverged {
        iterations: MAX_ITERATIONS,
    })
}

fn sum_of_squares(data: &[f64], p: &Vector4<f64>) -> f64 {
    data.iter()
        .enumerate()
        .map(|(i, &y)| (y - gaussian(i as f64, p[0], p[1], p[2], p[3])).powi(2))
        .sum()
}

/// Accumulate `J^T J` and `J^T r` for the current parameters.
fn normal_equations(data: &[f64], p: &Vector4<f64>) -> (Matrix4<f64>, Vector4<f64>) {
    let (a, mu, sigma, c) = (p[0], p[1], p[2], p[3]);
    let s2 = sigma * sigma;

    let mut jtj = Matrix4::zeros();
    let mut jtr = Vector4::zeros();
    for (i, &y) in data.iter().enumerate() {
        let d = i as f64 - mu;
        let e = (-d * d / (2.0 * s2)).exp();
        let r = y - (a * e + c);
        let j = Vector4::new(e, a * e * d / s2, a * e * d * d / (s2 * sigma), 1.0);
        jtj += j * j.transpose();
        jtr += j * r;
    }
    (jtj, jtr)
}

fn initial_guess(data: &[f64]) -> GaussianParams {
    let n = data.len();
    let offset = (data[0] + data[n - 1]) / 2.0;
    let peak = argmax_first(data).unwrap_or(n / 2);
    let amplitude = data[peak] - offset;
    let half = offset + amplitude / 2.0;

    let left = (0..peak).rev().find(|&k| data[k] <= half).map(|k| {
        interp(half, &[data[k], data[k + 1]], &[k as f64, (k + 1) as f64]).unwrap_or(k as f64)
    });
    let right = (peak + 1..n).find(|&k| data[k] <= half).map(|k| {
        interp(half, &[data[k], data[k - 1]], &[k as f64, (k - 1) as f64]).unwrap_or(k as f64)
    });

    let fwhm = match (left, right) {
        (Some(l), Some(r)) => r - l,
        (Some(l), None) => 2.0 * (peak as f64 - l),
        (None, Some(r)) => 2.0 * (r - peak as f64),
        (None, None) => n as f64 / 2.0,
    };
    let sigma = if fwhm > 0.0 {
        fwhm / FWHM_PER_SIGMA
    } else {
        n as f64 / 4.0
    };

    GaussianParams {
        amplitude,
        center: peak as f64,
        sigma,
        offset,
    }
}
