//! Binary morphology with square all-ones structuring elements.
//!
//! A square element separates into two 1D passes, so dilation and erosion
//! run in O(n * k) instead of O(n * k^2). The anchor sits at `size / 2`;
//! for even sizes this matches the usual convention of a slightly
//! asymmetric neighborhood. Out-of-bounds samples never set a dilated
//! pixel and never clear an eroded one.

use crate::image::{GrayImage, Mask};
use crate::util::ChromatchResult;

/// Grows set regions by a `size`-square element, one iteration.
///
/// The output is always a superset of the input; `size <= 1` is an
/// identity operation.
pub fn dilate(mask: &Mask, size: usize) -> ChromatchResult<Mask> {
    if size <= 1 {
        return Ok(mask.clone());
    }
    let rows = axis_pass(mask.as_gray(), size, false, true)?;
    let full = axis_pass(&rows, size, true, true)?;
    Mask::from_raw(full.as_slice().to_vec(), full.width(), full.height())
}

/// Shrinks set regions by a `size`-square element, one iteration.
pub fn erode(mask: &Mask, size: usize) -> ChromatchResult<Mask> {
    if size <= 1 {
        return Ok(mask.clone());
    }
    let rows = axis_pass(mask.as_gray(), size, false, false)?;
    let full = axis_pass(&rows, size, true, false)?;
    Mask::from_raw(full.as_slice().to_vec(), full.width(), full.height())
}

/// Morphological closing: `iterations` dilations followed by the same
/// number of erosions, with a fixed 3x3 element.
///
/// Bridges gaps in edge contours up to roughly `2 * iterations` pixels.
pub fn close(mask: &Mask, iterations: usize) -> ChromatchResult<Mask> {
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = dilate(&out, 3)?;
    }
    for _ in 0..iterations {
        out = erode(&out, 3)?;
    }
    Ok(out)
}

/// One max/min filter pass along an axis with window `size` anchored at
/// `size / 2`.
fn axis_pass(
    src: &GrayImage,
    size: usize,
    vertical: bool,
    take_max: bool,
) -> ChromatchResult<GrayImage> {
    let width = src.width();
    let height = src.height();
    let anchor = (size / 2) as isize;
    let span = size as isize;

    let mut data = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc: u8 = if take_max { 0 } else { 255 };
            for k in 0..span {
                let off = k - anchor;
                let (sx, sy) = if vertical {
                    (x as isize, y as isize + off)
                } else {
                    (x as isize + off, y as isize)
                };
                if sx < 0 || sy < 0 || sx >= width as isize || sy >= height as isize {
                    continue;
                }
                let v = src.at(sx as usize, sy as usize);
                acc = if take_max { acc.max(v) } else { acc.min(v) };
            }
            data[y * width + x] = acc;
        }
    }
    GrayImage::new(data, width, height)
}

#[cfg(test)]
mod tests {
    use super::{close, dilate, erode};
    use crate::image::Mask;

    fn single_pixel_mask(width: usize, height: usize, x: usize, y: usize) -> Mask {
        let mut data = vec![0u8; width * height];
        data[y * width + x] = 255;
        Mask::from_raw(data, width, height).unwrap()
    }

    #[test]
    fn dilate_grows_a_point_into_a_square() {
        let mask = single_pixel_mask(7, 7, 3, 3);
        let grown = dilate(&mask, 3).unwrap();
        assert_eq!(grown.count_set(), 9);
        assert!(grown.is_set(2, 2));
        assert!(grown.is_set(4, 4));
        assert!(!grown.is_set(1, 3));
    }

    #[test]
    fn dilation_is_a_superset_of_the_input() {
        let mask = single_pixel_mask(10, 10, 1, 8);
        for size in [2usize, 3, 5, 20] {
            let grown = dilate(&mask, size).unwrap();
            for y in 0..10 {
                for x in 0..10 {
                    if mask.is_set(x, y) {
                        assert!(grown.is_set(x, y), "size {size} lost ({x}, {y})");
                    }
                }
            }
        }
    }

    #[test]
    fn erode_removes_isolated_pixels() {
        let mask = single_pixel_mask(5, 5, 2, 2);
        let shrunk = erode(&mask, 3).unwrap();
        assert_eq!(shrunk.count_set(), 0);
    }

    #[test]
    fn closing_bridges_a_one_pixel_gap() {
        let mut data = vec![0u8; 9 * 3];
        // Horizontal segment with a gap at x = 4, y = 1.
        for x in 0..9 {
            if x != 4 {
                data[9 + x] = 255;
            }
        }
        let mask = Mask::from_raw(data, 9, 3).unwrap();
        let closed = close(&mask, 1).unwrap();
        assert!(closed.is_set(4, 1));
    }
}
