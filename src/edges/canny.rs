//! Gradient-magnitude edge detection with dual-threshold hysteresis.
//!
//! 3x3 Sobel gradients, L1 magnitude, non-maximum suppression along the
//! quantized gradient direction, then hysteresis: pixels above the high
//! threshold seed a flood over 8-connected pixels above the low threshold.

use crate::image::{GrayImage, Mask};
use crate::util::ChromatchResult;

const TAN_22_5: f32 = 0.414_213_56;
const TAN_67_5: f32 = 2.414_213_5;

/// Detects edges in a grayscale image, producing a binary mask.
pub(crate) fn canny(src: &GrayImage, low: f32, high: f32) -> ChromatchResult<Mask> {
    let width = src.width();
    let height = src.height();

    let (gx, gy) = sobel(src);
    let mut mag = vec![0.0f32; width * height];
    for i in 0..mag.len() {
        mag[i] = (gx[i].abs() + gy[i].abs()) as f32;
    }

    let thin = suppress_non_maxima(&mag, &gx, &gy, width, height);

    // Hysteresis: strong pixels seed, weak pixels join when connected.
    let mut state = vec![PixelState::None; width * height];
    let mut stack = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if thin[idx] > high {
                state[idx] = PixelState::Edge;
                stack.push((x, y));
            } else if thin[idx] > low {
                state[idx] = PixelState::Weak;
            }
        }
    }
    while let Some((x, y)) = stack.pop() {
        for (nx, ny) in neighbors8(x, y, width, height) {
            let idx = ny * width + nx;
            if state[idx] == PixelState::Weak {
                state[idx] = PixelState::Edge;
                stack.push((nx, ny));
            }
        }
    }

    let data = state
        .iter()
        .map(|&s| if s == PixelState::Edge { 255u8 } else { 0u8 })
        .collect();
    Mask::from_raw(data, width, height)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PixelState {
    None,
    Weak,
    Edge,
}

/// 3x3 Sobel gradients with replicated borders.
fn sobel(src: &GrayImage) -> (Vec<i32>, Vec<i32>) {
    let width = src.width();
    let height = src.height();
    let at = |x: isize, y: isize| -> i32 {
        let cx = x.clamp(0, width as isize - 1) as usize;
        let cy = y.clamp(0, height as isize - 1) as usize;
        src.at(cx, cy) as i32
    };

    let mut gx = vec![0i32; width * height];
    let mut gy = vec![0i32; width * height];
    for y in 0..height as isize {
        for x in 0..width as isize {
            let tl = at(x - 1, y - 1);
            let tc = at(x, y - 1);
            let tr = at(x + 1, y - 1);
            let ml = at(x - 1, y);
            let mr = at(x + 1, y);
            let bl = at(x - 1, y + 1);
            let bc = at(x, y + 1);
            let br = at(x + 1, y + 1);

            let idx = y as usize * width + x as usize;
            gx[idx] = (tr + 2 * mr + br) - (tl + 2 * ml + bl);
            gy[idx] = (bl + 2 * bc + br) - (tl + 2 * tc + tr);
        }
    }
    (gx, gy)
}

/// Keeps a pixel only when its magnitude is a maximum along the gradient
/// direction, quantized to horizontal, vertical, or one of two diagonals.
fn suppress_non_maxima(
    mag: &[f32],
    gx: &[i32],
    gy: &[i32],
    width: usize,
    height: usize,
) -> Vec<f32> {
    let sample = |x: isize, y: isize| -> f32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0.0
        } else {
            mag[y as usize * width + x as usize]
        }
    };

    let mut out = vec![0.0f32; width * height];
    for y in 0..height as isize {
        for x in 0..width as isize {
            let idx = y as usize * width + x as usize;
            let m = mag[idx];
            if m == 0.0 {
                continue;
            }
            let ax = gx[idx].abs() as f32;
            let ay = gy[idx].abs() as f32;

            let (n1, n2) = if ay <= TAN_22_5 * ax {
                // Near-horizontal gradient: compare along x.
                (sample(x - 1, y), sample(x + 1, y))
            } else if ay >= TAN_67_5 * ax {
                // Near-vertical gradient: compare along y.
                (sample(x, y - 1), sample(x, y + 1))
            } else if (gx[idx] > 0) == (gy[idx] > 0) {
                (sample(x - 1, y - 1), sample(x + 1, y + 1))
            } else {
                (sample(x + 1, y - 1), sample(x - 1, y + 1))
            };

            if m >= n1 && m >= n2 {
                out[idx] = m;
            }
        }
    }
    out
}

fn neighbors8(x: usize, y: usize, width: usize, height: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity(8);
    for dy in -1isize..=1 {
        for dx in -1isize..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx >= 0 && ny >= 0 && nx < width as isize && ny < height as isize {
                out.push((nx as usize, ny as usize));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::canny;
    use crate::image::GrayImage;

    #[test]
    fn flat_image_has_no_edges() {
        let img = GrayImage::filled(20, 20, 128).unwrap();
        let edges = canny(&img, 50.0, 150.0).unwrap();
        assert_eq!(edges.count_set(), 0);
    }

    #[test]
    fn vertical_step_produces_a_vertical_edge() {
        let mut img = GrayImage::filled(20, 20, 0).unwrap();
        for y in 0..20 {
            for x in 10..20 {
                img.put(x, y, 255);
            }
        }
        let edges = canny(&img, 50.0, 150.0).unwrap();
        assert!(edges.count_set() > 0);
        // Every detected pixel hugs the step at x = 10.
        for y in 0..20 {
            for x in 0..20 {
                if edges.is_set(x, y) {
                    assert!((9..=11).contains(&x), "edge at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn gradients_below_the_low_threshold_are_dropped() {
        let mut img = GrayImage::filled(16, 16, 100).unwrap();
        for y in 0..16 {
            for x in 8..16 {
                img.put(x, y, 130);
            }
        }
        let edges = canny(&img, 500.0, 1000.0).unwrap();
        assert_eq!(edges.count_set(), 0);
    }
}
