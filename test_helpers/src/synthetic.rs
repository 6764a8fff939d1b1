//! Deterministic synthetic images.
//!
//! Coordinates are `(row, column)` in pixels, with fractional centers
//! allowed everywhere.

use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Isotropic Gaussian spot of peak `amplitude`.
pub fn gaussian_blob(
    shape: (usize, usize),
    center: (f64, f64),
    sigma: f64,
    amplitude: f64,
) -> Array2<f64> {
    Array2::from_shape_fn(shape, |(r, c)| {
        let d2 = (r as f64 - center.0).powi(2) + (c as f64 - center.1).powi(2);
        amplitude * (-d2 / (2.0 * sigma * sigma)).exp()
    })
}

/// Velocity-map style image: a Gaussian ring of unit peak around a dimmer
/// central spot.
///
/// # Arguments
/// * `radius` - Ring radius in pixels
/// * `width` - Gaussian sigma of the ring cross-section
pub fn ring_image(shape: (usize, usize), center: (f64, f64), radius: f64, width: f64) -> Array2<f64> {
    Array2::from_shape_fn(shape, |(r, c)| {
        let rho = (r as f64 - center.0).hypot(c as f64 - center.1);
        let ring = (-(rho - radius).powi(2) / (2.0 * width * width)).exp();
        let spot = 0.5 * (-(rho * rho) / (2.0 * (radius / 4.0).powi(2))).exp();
        ring + spot
    })
}

/// Zero image with a single pixel set to `value`.
pub fn impulse(shape: (usize, usize), at: (usize, usize), value: f64) -> Array2<f64> {
    let mut image = Array2::zeros(shape);
    image[at] = value;
    image
}

/// Image whose pixel values encode their own position, `row * 1000 + col + 1`.
///
/// Every pixel is distinct and non-zero, which makes crops and offsets easy
/// to check by content.
pub fn numbered(shape: (usize, usize)) -> Array2<f64> {
    Array2::from_shape_fn(shape, |(r, c)| (r * 1000 + c + 1) as f64)
}

/// Add zero-mean Gaussian noise of standard deviation `sigma`.
///
/// The same `seed` always produces the same noise.
pub fn add_noise(image: &mut Array2<f64>, sigma: f64, seed: u64) {
    if sigma <= 0.0 {
        return;
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(0.0, sigma).expect("sigma is positive and finite");
    image.mapv_inplace(|v| v + normal.sample(&mut rng));
}
