use chromatch::{edge_map, ChromatchError, EdgeConfig, Rgb, RgbImage, SmoothingMethod};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn noisy_image(width: usize, height: usize, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut img = RgbImage::zeros(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            img.set_pixel(
                x,
                y,
                Rgb([
                    rng.random_range(0..=255),
                    rng.random_range(0..=255),
                    rng.random_range(0..=255),
                ]),
            );
        }
    }
    img
}

#[test]
fn edge_transform_is_deterministic_for_every_method() {
    let img = noisy_image(48, 36, 99);
    for smoothing in [
        SmoothingMethod::Gaussian,
        SmoothingMethod::Bilateral,
        SmoothingMethod::Median,
    ] {
        let cfg = EdgeConfig {
            smoothing,
            ..EdgeConfig::default()
        };
        let first = edge_map(&img, &cfg).unwrap();
        let second = edge_map(&img, &cfg).unwrap();
        assert_eq!(
            first.as_slice(),
            second.as_slice(),
            "{smoothing} produced differing edge maps"
        );
    }
}

#[test]
fn edge_map_preserves_spatial_dimensions() {
    let img = noisy_image(31, 17, 5);
    let edges = edge_map(&img, &EdgeConfig::default()).unwrap();
    assert_eq!(edges.width(), 31);
    assert_eq!(edges.height(), 17);
    assert!(edges.as_slice().iter().all(|&v| v == 0 || v == 255));
}

#[test]
fn a_solid_rectangle_produces_a_closed_contour() {
    let mut img = RgbImage::zeros(40, 40).unwrap();
    for y in 10..30 {
        for x in 10..30 {
            img.set_pixel(x, y, Rgb([255, 255, 255]));
        }
    }
    let edges = edge_map(&img, &EdgeConfig::default()).unwrap();
    assert!(edges.count_set() > 0);
    // No edges far away from the rectangle boundary.
    for y in 0..5 {
        for x in 0..40 {
            assert!(!edges.is_set(x, y));
        }
    }
    for y in 17..23 {
        for x in 17..23 {
            assert!(!edges.is_set(x, y), "interior edge at ({x}, {y})");
        }
    }
}

#[test]
fn even_smoothing_kernels_are_a_configuration_error() {
    let img = noisy_image(16, 16, 1);
    for smoothing in [
        SmoothingMethod::Gaussian,
        SmoothingMethod::Bilateral,
        SmoothingMethod::Median,
    ] {
        let cfg = EdgeConfig {
            smoothing,
            smoothing_kernel: 4,
            ..EdgeConfig::default()
        };
        let err = edge_map(&img, &cfg).unwrap_err();
        assert_eq!(err, ChromatchError::InvalidKernelSize { size: 4 });
    }
}

#[test]
fn swapped_hysteresis_thresholds_are_a_configuration_error() {
    let img = noisy_image(16, 16, 1);
    let cfg = EdgeConfig {
        canny_low: 150.0,
        canny_high: 50.0,
        ..EdgeConfig::default()
    };
    let err = edge_map(&img, &cfg).unwrap_err();
    assert_eq!(
        err,
        ChromatchError::InvalidCannyThresholds {
            low: 150.0,
            high: 50.0,
        }
    );
}

#[test]
fn closing_never_loses_detected_edges() {
    let img = noisy_image(40, 30, 42);
    let raw = edge_map(
        &img,
        &EdgeConfig {
            closing_iterations: 0,
            ..EdgeConfig::default()
        },
    )
    .unwrap();
    let closed = edge_map(
        &img,
        &EdgeConfig {
            closing_iterations: 1,
            ..EdgeConfig::default()
        },
    )
    .unwrap();
    for y in 0..30 {
        for x in 0..40 {
            if raw.is_set(x, y) {
                assert!(closed.is_set(x, y), "closing dropped edge at ({x}, {y})");
            }
        }
    }
}
