//! End-to-end checks of origin finding and re-centering on synthetic images.

use approx::assert_abs_diff_eq;
use ndarray::{s, Array2, Axis};
use test_helpers::output_path;
use test_helpers::synthetic::{add_noise, gaussian_blob, impulse, numbered, ring_image};
use vmi_center::{
    center_image, find_origin, find_origin_by_center_of_image, find_origin_by_convolution,
    find_origin_by_slice, set_center, Axes, CenterError, CenterMethod, CenterOptions, CropPolicy,
    Origin, OriginMethod, OriginOptions,
};

const CROPS: [CropPolicy; 3] = [
    CropPolicy::MaintainSize,
    CropPolicy::ValidRegion,
    CropPolicy::MaintainData,
];

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn centroid(image: &Array2<f64>) -> (f64, f64) {
    let total = image.sum();
    let mut row = 0.0;
    let mut col = 0.0;
    for ((r, c), &v) in image.indexed_iter() {
        row += r as f64 * v;
        col += c as f64 * v;
    }
    (row / total, col / total)
}

#[test]
fn test_image_center_origin_is_a_no_op() {
    init_logging();
    for size in [1, 3, 9, 25] {
        let data = numbered((size, size));
        let origin =
            find_origin_by_center_of_image(data.view(), &OriginOptions::default()).unwrap();
        for crop in CROPS {
            let out = set_center(data.view(), origin.into(), crop, Axes::BOTH, 3).unwrap();
            assert_eq!(out, data, "size {size}, crop {crop}");
        }
    }
}

#[test]
fn test_image_center_shapes() {
    let options = OriginOptions::default();
    let odd = Array2::<f64>::zeros((5, 7));
    let even = Array2::<f64>::zeros((4, 6));
    assert_eq!(find_origin_by_center_of_image(odd.view(), &options).unwrap(), (2.0, 3.0));
    assert_eq!(find_origin_by_center_of_image(even.view(), &options).unwrap(), (2.0, 3.0));
}

#[test]
fn test_maintain_size_keeps_shape() {
    init_logging();
    let data = numbered((8, 11));
    let origins = [
        Origin::new(0.0, 0.0),
        Origin::new(7.0, 10.0),
        Origin::new(3.25, 6.5),
        Origin::new(-2.5, -1.0),
        Origin::row_only(5.5),
        Origin::col_only(2.0),
        Origin::new(40.0, -30.0),
    ];
    for origin in origins {
        for axes in [Axes::BOTH, Axes::ROWS, Axes::COLS] {
            let out = set_center(data.view(), origin, CropPolicy::MaintainSize, axes, 3).unwrap();
            assert_eq!(out.dim(), data.dim(), "origin {origin}, axes {axes:?}");
        }
    }
}

#[test]
fn test_valid_region_is_contiguous_slice() {
    let data = numbered((9, 12));
    let (rows, cols) = data.dim();
    for r in 0..rows {
        for c in 0..cols {
            let out = set_center(
                data.view(),
                Origin::new(r as f64, c as f64),
                CropPolicy::ValidRegion,
                Axes::BOTH,
                3,
            )
            .unwrap();
            let dr = r.min(rows - 1 - r);
            let dc = c.min(cols - 1 - c);
            assert_eq!(out, data.slice(s![r - dr..=r + dr, c - dc..=c + dc]));
            assert!(out.nrows() <= rows && out.ncols() <= cols);
        }
    }
}

#[test]
fn test_maintain_data_embeds_input() {
    let data = numbered((9, 12));
    let (rows, cols) = data.dim();
    for (r, c) in [(0, 0), (2, 9), (8, 5), (4, 11)] {
        let out = set_center(
            data.view(),
            Origin::new(r as f64, c as f64),
            CropPolicy::MaintainData,
            Axes::BOTH,
            3,
        )
        .unwrap();
        let d_r = r.max(rows - 1 - r);
        let d_c = c.max(cols - 1 - c);
        assert_eq!(out.dim(), (2 * d_r + 1, 2 * d_c + 1));

        let (top, left) = (d_r - r, d_c - c);
        assert_eq!(out.slice(s![top..top + rows, left..left + cols]), data);
        let nonzero = out.iter().filter(|&&v| v != 0.0).count();
        assert_eq!(nonzero, data.len());
    }
}

#[test]
fn test_whole_pixel_shift_round_trip() {
    let mut canvas = Array2::<f64>::zeros((21, 21));
    canvas
        .slice_mut(s![7..14, 7..14])
        .assign(&numbered((7, 7)));

    for (dr, dc) in [(3.0, -2.0), (-4.0, 5.0), (0.0, 6.0)] {
        let there = set_center(
            canvas.view(),
            Origin::new(10.0 - dr, 10.0 - dc),
            CropPolicy::MaintainSize,
            Axes::BOTH,
            0,
        )
        .unwrap();
        let back = set_center(
            there.view(),
            Origin::new(10.0 + dr, 10.0 + dc),
            CropPolicy::MaintainSize,
            Axes::BOTH,
            0,
        )
        .unwrap();
        assert_eq!(back, canvas);
    }
}

#[test]
fn test_convolution_finds_impulse() {
    for at in [(0, 0), (3, 17), (12, 4), (15, 19)] {
        let image = impulse((16, 20), at, 7.0);
        let origin = find_origin_by_convolution(image.view(), &OriginOptions::default()).unwrap();
        assert_eq!(origin, (at.0 as f64, at.1 as f64));
    }
}

#[test]
fn test_slice_alignment_on_symmetric_blob() {
    init_logging();
    let image = gaussian_blob((61, 61), (30.0, 30.0), 6.0, 10.0);
    let (row, col) = find_origin_by_slice(image.view(), &OriginOptions::default()).unwrap();
    assert_abs_diff_eq!(row, 30.0, epsilon = 0.1);
    assert_abs_diff_eq!(col, 30.0, epsilon = 0.1);
}

#[test]
fn test_invalid_crop_name() {
    let err = "keep_everything".parse::<CropPolicy>().unwrap_err();
    assert!(matches!(err, CenterError::InvalidCrop(_)));

    let parsed = serde_json::from_str::<CenterOptions>(r#"{"crop": "keep_everything"}"#);
    assert!(parsed.is_err());
}

#[test]
fn test_row_axis_only_leaves_columns_alone() {
    let data = numbered((9, 11));

    for crop in CROPS {
        let out = set_center(data.view(), Origin::new(2.0, 7.0), crop, Axes::ROWS, 3).unwrap();
        assert_eq!(out.ncols(), data.ncols(), "crop {crop}");
        // Every non-empty output row is an unmodified input row.
        for row in out.rows() {
            if row.iter().all(|&v| v == 0.0) {
                continue;
            }
            assert!(data.rows().into_iter().any(|input| input == row));
        }
    }

    // A fractional row shift only redistributes intensity within each column.
    let out = set_center(
        data.view(),
        Origin::new(3.4, 7.0),
        CropPolicy::MaintainData,
        Axes::ROWS,
        1,
    )
    .unwrap();
    assert_eq!(out.ncols(), data.ncols());
    let before = data.sum_axis(Axis(0));
    let after = out.sum_axis(Axis(0));
    for (a, b) in before.iter().zip(after.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
    }
}

#[test]
fn test_center_noisy_ring() {
    init_logging();
    let mut image = ring_image((101, 101), (49.4, 51.7), 30.0, 2.0);
    add_noise(&mut image, 0.01, 1);

    let origin = find_origin(image.view(), OriginMethod::CenterOfMass, &OriginOptions::default())
        .unwrap();
    assert_abs_diff_eq!(origin.0, 49.4, epsilon = 0.15);
    assert_abs_diff_eq!(origin.1, 51.7, epsilon = 0.15);

    let centered = center_image(image.view(), OriginMethod::CenterOfMass, &CenterOptions::default())
        .unwrap();
    assert_eq!(centered.dim(), (101, 101));
    let (row, col) = centroid(&centered);
    assert_abs_diff_eq!(row, 50.0, epsilon = 0.15);
    assert_abs_diff_eq!(col, 50.0, epsilon = 0.15);

    let summary = serde_json::json!({
        "origin": [origin.0, origin.1],
        "centered_centroid": [row, col],
        "shape": [centered.nrows(), centered.ncols()],
    });
    std::fs::write(output_path("center_noisy_ring.json"), summary.to_string())
        .expect("Failed to write summary");
}

#[test]
fn test_center_image_by_name_with_square_trim() {
    init_logging();
    // 30 columns -> 29 (odd_size), rows 41 -> 29 (square)
    let image = gaussian_blob((41, 30), (19.6, 13.2), 3.0, 50.0);
    let options = CenterOptions {
        square: true,
        crop: CropPolicy::ValidRegion,
        ..Default::default()
    };
    let method: CenterMethod = "gaussian".parse().unwrap();
    let centered = center_image(image.view(), method, &options).unwrap();

    assert_eq!(centered.nrows() % 2, 1);
    assert_eq!(centered.ncols() % 2, 1);
    let (row, col) = centroid(&centered);
    assert_abs_diff_eq!(row, ((centered.nrows() - 1) / 2) as f64, epsilon = 0.1);
    assert_abs_diff_eq!(col, ((centered.ncols() - 1) / 2) as f64, epsilon = 0.1);
}

#[test]
fn test_center_options_from_json() {
    let options: CenterOptions = serde_json::from_str(
        r#"{
            "crop": "valid_region",
            "axes": [0],
            "origin": {"round_output": true, "slice": {"radial_range": [5, -5]}}
        }"#,
    )
    .unwrap();
    assert!(options.odd_size);
    assert_eq!(options.crop, CropPolicy::ValidRegion);
    assert_eq!(options.axes, Axes::ROWS);
    assert_eq!(options.order, 3);
    assert!(options.origin.round_output);
    assert_eq!(options.origin.slice.radial_range, (5, -5));
    assert_eq!(options.origin.slice.slice_width, 10);

    let round_trip: CenterOptions =
        serde_json::from_str(&serde_json::to_string(&options).unwrap()).unwrap();
    assert_eq!(round_trip, options);
}

#[test]
fn test_every_method_on_centered_blob() {
    init_logging();
    let image = gaussian_blob((81, 81), (40.0, 40.0), 8.0, 10.0);
    for method in OriginMethod::ALL {
        let (row, col) = find_origin(image.view(), method, &OriginOptions::default())
            .unwrap_or_else(|e| panic!("{method} failed: {e}"));
        assert_abs_diff_eq!(row, 40.0, epsilon = 0.5);
        assert_abs_diff_eq!(col, 40.0, epsilon = 0.5);
    }
}
