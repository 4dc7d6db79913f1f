//! Area-averaging resize for single-channel `u8` buffers.
//!
//! Each destination pixel averages the source rectangle it covers, with
//! fractional coverage weights at the rectangle borders. This is the
//! decimation behavior expected for shrinking edge maps: set pixels blend
//! into proportional gray values instead of aliasing away.

use crate::image::{GrayImage, ImageView};
use crate::util::{ChromatchError, ChromatchResult};

/// Returns the destination dimensions for scaling `(width, height)` by `scale`.
///
/// Both axes round to the nearest integer, so a scale of exactly 1.0 is an
/// identity resize.
pub fn scaled_dims(width: usize, height: usize, scale: f32) -> (usize, usize) {
    let scale = scale as f64;
    let dst_w = (width as f64 * scale).round() as usize;
    let dst_h = (height as f64 * scale).round() as usize;
    (dst_w, dst_h)
}

/// Resizes `src` to `dst_width x dst_height` by area averaging.
pub fn resize_area(
    src: ImageView<'_, u8>,
    dst_width: usize,
    dst_height: usize,
) -> ChromatchResult<GrayImage> {
    if dst_width == 0 || dst_height == 0 {
        return Err(ChromatchError::InvalidDimensions {
            width: dst_width,
            height: dst_height,
        });
    }

    let src_width = src.width();
    let src_height = src.height();
    let inv_x = src_width as f64 / dst_width as f64;
    let inv_y = src_height as f64 / dst_height as f64;

    let mut data = Vec::with_capacity(dst_width * dst_height);
    for dy in 0..dst_height {
        let sy0 = dy as f64 * inv_y;
        let sy1 = ((dy + 1) as f64 * inv_y).min(src_height as f64);
        let row_lo = sy0.floor() as usize;
        let row_hi = (sy1.ceil() as usize).min(src_height);

        for dx in 0..dst_width {
            let sx0 = dx as f64 * inv_x;
            let sx1 = ((dx + 1) as f64 * inv_x).min(src_width as f64);
            let col_lo = sx0.floor() as usize;
            let col_hi = (sx1.ceil() as usize).min(src_width);

            let mut acc = 0.0f64;
            let mut area = 0.0f64;
            for sy in row_lo..row_hi {
                let wy = overlap(sy, sy0, sy1);
                if wy <= 0.0 {
                    continue;
                }
                let row = src.row(sy).ok_or(ChromatchError::BufferTooSmall {
                    needed: (sy + 1) * src.stride(),
                    got: src.as_slice().len(),
                })?;
                for sx in col_lo..col_hi {
                    let wx = overlap(sx, sx0, sx1);
                    if wx <= 0.0 {
                        continue;
                    }
                    let w = wx * wy;
                    acc += row[sx] as f64 * w;
                    area += w;
                }
            }

            let value = if area > 0.0 { acc / area } else { 0.0 };
            data.push(value.round().clamp(0.0, 255.0) as u8);
        }
    }

    GrayImage::new(data, dst_width, dst_height)
}

/// Coverage of the unit cell starting at `cell` by the interval `[lo, hi)`.
fn overlap(cell: usize, lo: f64, hi: f64) -> f64 {
    let cell_lo = cell as f64;
    let cell_hi = cell_lo + 1.0;
    (hi.min(cell_hi) - lo.max(cell_lo)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::{resize_area, scaled_dims};
    use crate::image::ImageView;

    #[test]
    fn scaled_dims_round_to_nearest() {
        assert_eq!(scaled_dims(100, 80, 0.5), (50, 40));
        assert_eq!(scaled_dims(100, 80, 1.0), (100, 80));
        assert_eq!(scaled_dims(10, 10, 0.25), (3, 3));
    }

    #[test]
    fn half_scale_averages_quads() {
        let data: Vec<u8> = vec![
            10, 20, 30, 40, //
            50, 60, 70, 80, //
            0, 0, 255, 255, //
            0, 0, 255, 255,
        ];
        let view = ImageView::from_slice(&data, 4, 4).unwrap();
        let out = resize_area(view, 2, 2).unwrap();
        assert_eq!(out.at(0, 0), 35);
        assert_eq!(out.at(1, 0), 55);
        assert_eq!(out.at(0, 1), 0);
        assert_eq!(out.at(1, 1), 255);
    }

    #[test]
    fn identity_resize_preserves_pixels() {
        let data: Vec<u8> = (0u8..12).collect();
        let view = ImageView::from_slice(&data, 4, 3).unwrap();
        let out = resize_area(view, 4, 3).unwrap();
        assert_eq!(out.as_slice(), data.as_slice());
    }
}
