//! Color-similarity region isolation.

use crate::edges::morph::dilate;
use crate::image::{Mask, Rgb, RgbImage};
use crate::trace::{trace_event, trace_span};
use crate::util::ChromatchResult;

/// Isolates regions of `target` whose color lies within `tolerance` of
/// `reference`, merged into contiguous blobs by dilation.
///
/// The similarity mask sets a pixel when its Euclidean RGB distance to the
/// reference is strictly below `tolerance`; pixels exactly at the boundary
/// distance are excluded. The mask is then dilated once with a
/// `dilation_size`-square all-ones element, and the returned image equals
/// the target where the dilated mask is set and black elsewhere.
///
/// A tolerance of zero selects nothing; the result is then an all-black
/// image and an empty mask, not an error.
pub fn isolate_regions(
    target: &RgbImage,
    reference: Rgb,
    tolerance: f32,
    dilation_size: usize,
) -> ChromatchResult<(RgbImage, Mask)> {
    let width = target.width();
    let height = target.height();
    let _span = trace_span!("isolate_regions", width = width, height = height).entered();

    let mut mask = Mask::empty(width, height)?;
    for y in 0..height {
        for x in 0..width {
            if target.pixel(x, y).distance(reference) < tolerance {
                mask.set(x, y);
            }
        }
    }

    let dilated = dilate(&mask, dilation_size)?;

    let mut extracted = RgbImage::zeros(width, height)?;
    for y in 0..height {
        for x in 0..width {
            if dilated.is_set(x, y) {
                extracted.set_pixel(x, y, target.pixel(x, y));
            }
        }
    }

    trace_event!(
        "regions_isolated",
        selected = mask.count_set(),
        dilated = dilated.count_set()
    );
    Ok((extracted, dilated))
}
