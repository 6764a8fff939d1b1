//! Direct 1D convolution helpers.

/// Full discrete convolution of two sequences.
///
/// The output has `a.len() + b.len() - 1` samples, matching the "full" mode
/// of the usual signal processing conventions. Either input being empty
/// yields an empty output.
pub fn convolve_full(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        if x == 0.0 {
            continue;
        }
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Index of the first maximum of `values`.
///
/// NaN samples are never selected. Returns `None` for an empty slice or one
/// containing only NaNs.
pub fn argmax_first(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
