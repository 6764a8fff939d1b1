use ndarray::ArrayView2;

use super::OriginOptions;
use crate::error::CenterError;

/// Geometric center `(rows / 2, cols / 2)` using integer division.
///
/// The image content is not inspected.
pub fn find_origin_by_center_of_image(
    image: ArrayView2<f64>,
    _options: &OriginOptions,
) -> Result<(f64, f64), CenterError> {
    let (rows, cols) = image.dim();
    Ok(((rows / 2) as f64, (cols / 2) as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_odd_and_even_shapes() {
        let options = OriginOptions::default();
        let odd = Array2::<f64>::zeros((5, 7));
        let even = Array2::<f64>::zeros((4, 6));
        assert_eq!(
            find_origin_by_center_of_image(odd.view(), &options).unwrap(),
            (2.0, 3.0)
        );
        assert_eq!(
            find_origin_by_center_of_image(even.view(), &options).unwrap(),
            (2.0, 3.0)
        );
    }
}
