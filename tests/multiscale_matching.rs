use chromatch::{match_multi_scale, Mask, ScaleRange};

/// Bullseye pattern in normalized [0, 1) coordinates: an outer ring plus a
/// center dot, distinctive enough to pin down both position and scale.
fn shape(u: f64, v: f64) -> bool {
    let du = u - 0.5;
    let dv = v - 0.5;
    let r = (du * du + dv * dv).sqrt();
    (0.30..0.48).contains(&r) || r < 0.12
}

fn rasterize_template(size: usize) -> Mask {
    let mut data = vec![0u8; size * size];
    for y in 0..size {
        for x in 0..size {
            let u = (x as f64 + 0.5) / size as f64;
            let v = (y as f64 + 0.5) / size as f64;
            if shape(u, v) {
                data[y * size + x] = 255;
            }
        }
    }
    Mask::from_raw(data, size, size).unwrap()
}

fn rasterize_field(
    width: usize,
    height: usize,
    shape_size: usize,
    offset: (usize, usize),
) -> Mask {
    let mut data = vec![0u8; width * height];
    for y in 0..shape_size {
        for x in 0..shape_size {
            let u = (x as f64 + 0.5) / shape_size as f64;
            let v = (y as f64 + 0.5) / shape_size as f64;
            if shape(u, v) {
                data[(y + offset.1) * width + (x + offset.0)] = 255;
            }
        }
    }
    Mask::from_raw(data, width, height).unwrap()
}

#[test]
fn unit_scale_copy_is_recovered_exactly() {
    let template = rasterize_template(24);
    let candidate = rasterize_field(80, 60, 24, (31, 22));

    let result = match_multi_scale(&candidate, &template, &ScaleRange::default())
        .unwrap()
        .expect("a valid scale exists");

    assert_eq!(result.top_left, (31, 22));
    assert_eq!(result.bottom_right, (31 + 24, 22 + 24));
    assert!((result.scale - 1.0).abs() < 1e-3);
    assert!(result.score > 0.99, "score {}", result.score);
}

#[test]
fn known_scale_factor_is_recovered_within_one_step() {
    // The field holds the pattern at 30 px; the 24 px template aligns when
    // the field is shrunk by 24/30 = 0.8.
    let range = ScaleRange::default();
    let template = rasterize_template(24);
    let candidate = rasterize_field(90, 70, 30, (25, 15));

    let result = match_multi_scale(&candidate, &template, &range)
        .unwrap()
        .expect("a valid scale exists");

    assert!(
        (result.scale - 0.8).abs() <= range.step + 1e-4,
        "expected scale near 0.8, got {}",
        result.scale
    );
    let (tx, ty) = result.top_left;
    assert!(
        (tx as i64 - 25).abs() <= 3 && (ty as i64 - 15).abs() <= 3,
        "expected top-left near (25, 15), got ({tx}, {ty})"
    );
    // Bounding-box size is scale-invariant by construction.
    assert_eq!(result.bottom_right.0 - result.top_left.0, 24);
    assert_eq!(result.bottom_right.1 - result.top_left.1, 24);
}

#[test]
fn oversized_template_yields_no_match() {
    // Even one extra step past max (1.6) keeps the candidate at 32 px,
    // smaller than the 40 px template.
    let template = rasterize_template(40);
    let candidate = rasterize_field(20, 20, 10, (5, 5));

    let result = match_multi_scale(&candidate, &template, &ScaleRange::default()).unwrap();
    assert!(result.is_none());
}

#[test]
fn invalid_scale_range_is_an_error() {
    let template = rasterize_template(8);
    let candidate = rasterize_field(40, 40, 8, (10, 10));
    let bad = ScaleRange {
        min: 0.5,
        max: 1.5,
        step: -0.1,
    };
    assert!(match_multi_scale(&candidate, &template, &bad).is_err());
}
