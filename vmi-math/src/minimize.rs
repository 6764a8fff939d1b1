//! Bounded minimization of a scalar function of one variable.
//!
//! The search is a projected quasi-Newton descent: the gradient is estimated
//! with a central finite difference, the curvature with a secant update, and
//! every trial point is clipped to the bounds. A backtracking line search
//! enforces sufficient decrease. Iteration stops when either
//!
//! - the relative reduction of the objective over one step falls to `ftol`, or
//! - the projected gradient falls to `gtol`.
//!
//! The caller always receives a [`MinimizeResult`]; whether the value can be
//! trusted is carried by its `success` flag, never by a panic.

use log::trace;

/// Options for [`minimize_bounded`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeOptions {
    /// Relative reduction of the objective below which the search stops
    pub ftol: f64,
    /// Projected gradient magnitude below which the search stops
    pub gtol: f64,
    /// Maximum number of descent iterations
    pub max_iterations: usize,
    /// Finite difference step for the gradient estimate
    pub gradient_step: f64,
}

impl MinimizeOptions {
    /// Options with both stopping tolerances set to `tol`.
    pub fn with_tolerance(tol: f64) -> Self {
        Self {
            ftol: tol,
            gtol: tol,
            ..Default::default()
        }
    }
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            ftol: 2.220446049250313e-9,
            gtol: 1e-5,
            max_iterations: 15000,
            gradient_step: 1e-8,
        }
    }
}

/// Outcome of a bounded minimization.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeResult {
    /// Best argument found
    pub x: f64,
    /// Objective value at `x`
    pub fun: f64,
    /// Whether a convergence criterion was met
    pub success: bool,
    /// Number of descent iterations performed
    pub iterations: usize,
    /// Number of objective evaluations, including gradient estimates
    pub evaluations: usize,
    /// Human readable termination reason
    pub message: String,
}

struct Objective<F> {
    f: F,
    lower: f64,
    upper: f64,
    step: f64,
    evaluations: usize,
}

impl<F: FnMut(f64) -> f64> Objective<F> {
    fn value(&mut self, x: f64) -> f64 {
        self.evaluations += 1;
        (self.f)(x)
    }

    /// Central difference, one-sided where a bound is in the way.
    fn gradient(&mut self, x: f64, fx: f64) -> f64 {
        let h = self.step * x.abs().max(1.0);
        let up = (x + h).min(self.upper);
        let down = (x - h).max(self.lower);
        if up > x && down < x {
            (self.value(up) - self.value(down)) / (up - down)
        } else if up > x {
            (self.value(up) - fx) / (up - x)
        } else if down < x {
            (fx - self.value(down)) / (x - down)
        } else {
            0.0
        }
    }
}

/// Minimize `f` over `[bounds.0, bounds.1]` starting from `x0`.
///
/// `x0` is clipped into the bounds before the first evaluation.
///
/// # Arguments
/// * `f` - Objective function
/// * `x0` - Initial guess
/// * `bounds` - Inclusive `(lower, upper)` search interval
/// * `options` - Stopping tolerances and iteration cap
///
/// # Returns
/// A [`MinimizeResult`] whose `success` flag is false when the objective is
/// not finite or the iteration cap is hit. A line search that can no longer
/// reduce the objective counts as success only when the projected gradient
/// there is within `sqrt(gtol)`.
pub fn minimize_bounded<F>(
    f: F,
    x0: f64,
    bounds: (f64, f64),
    options: &MinimizeOptions,
) -> MinimizeResult
where
    F: FnMut(f64) -> f64,
{
    let (lower, upper) = bounds;
    let mut objective = Objective {
        f,
        lower,
        upper,
        step: options.gradient_step,
        evaluations: 0,
    };

    let mut x = x0.clamp(lower, upper);
    let mut fx = objective.value(x);
    let finish = |x: f64, fun: f64, success: bool, iterations: usize, evals: usize, msg: &str| {
        MinimizeResult {
            x,
            fun,
            success,
            iterations,
            evaluations: evals,
            message: msg.to_string(),
        }
    };

    if !fx.is_finite() {
        return finish(x, fx, false, 0, objective.evaluations, "objective is not finite");
    }

    let mut g = objective.gradient(x, fx);
    let mut inverse_curvature: Option<f64> = None;

    for iteration in 1..=options.max_iterations {
        if !g.is_finite() {
            return finish(
                x,
                fx,
                false,
                iteration - 1,
                objective.evaluations,
                "gradient is not finite",
            );
        }
        let projected = (x - g).clamp(lower, upper) - x;
        if projected.abs() <= options.gtol {
            return finish(
                x,
                fx,
                true,
                iteration - 1,
                objective.evaluations,
                "projected gradient below tolerance",
            );
        }

        let direction = -g * inverse_curvature.unwrap_or(1.0);
        let max_step = if direction > 0.0 {
            (upper - x) / direction
        } else {
            (lower - x) / direction
        };
        let mut alpha = match inverse_curvature {
            Some(_) => 1.0f64.min(max_step),
            None => (1.0 / g.abs()).min(1.0).min(max_step),
        };

        let slope = g * direction;
        let (x_new, f_new) = loop {
            let candidate = (x + alpha * direction).clamp(lower, upper);
            let value = objective.value(candidate);
            if value.is_finite() && value <= fx + 1e-4 * alpha * slope {
                break (candidate, value);
            }
            alpha *= 0.5;
            if alpha * direction.abs() < f64::EPSILON * x.abs().max(1.0) {
                // Rounding noise in the objective can stall the search at the minimum.
                let stationary = projected.abs() <= options.gtol.sqrt();
                let message = if stationary {
                    "line search stalled near a stationary point"
                } else {
                    "line search failed to reduce the objective"
                };
                return finish(x, fx, stationary, iteration, objective.evaluations, message);
            }
        };

        trace!("iteration {iteration}: x = {x_new}, f = {f_new}, step = {alpha}");

        let reduction = (fx - f_new) / fx.abs().max(f_new.abs()).max(1.0);
        let g_new = objective.gradient(x_new, f_new);
        let s = x_new - x;
        let y = g_new - g;
        x = x_new;
        fx = f_new;
        g = g_new;

        if reduction <= options.ftol {
            return finish(
                x,
                fx,
                true,
                iteration,
                objective.evaluations,
                "relative reduction of objective below tolerance",
            );
        }

        if s * y > f64::EPSILON * y * y {
            inverse_curvature = Some(s / y);
        }
    }

    finish(
        x,
        fx,
        false,
        options.max_iterations,
        objective.evaluations,
        "iteration limit reached",
    )
}
