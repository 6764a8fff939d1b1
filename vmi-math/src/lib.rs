//! Numerical building blocks used by the image centering routines.
//!
//! This crate collects the small amount of numerics that origin finding and
//! re-centering depend on:
//!
//! - **B-spline shifting**: sub-pixel translation of 1D and 2D arrays with zero fill
//! - **Bounded scalar minimization**: projected quasi-Newton search on an interval
//! - **Gaussian fitting**: Levenberg-Marquardt fit of a 1D Gaussian with baseline
//! - **Convolution**: full discrete convolution and first-maximum search
//! - **Linear interpolation**: binary-search interpolation on sorted samples

pub mod convolve;
pub mod gaussian;
pub mod interp;
pub mod minimize;
pub mod spline;

pub use convolve::{argmax_first, convolve_full};
pub use gaussian::{fit_gaussian, gaussian, FitError, GaussianParams};
pub use interp::{interp, InterpError};
pub use minimize::{minimize_bounded, MinimizeOptions, MinimizeResult};
pub use spline::{shift, shift_1d, ShiftError, MAX_SPLINE_ORDER};
