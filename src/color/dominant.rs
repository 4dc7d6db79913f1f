//! Dominant color extraction from template images.

use crate::image::Rgb;
use crate::template::Template;
use std::collections::HashMap;

struct Tally {
    count: usize,
    first_seen: usize,
}

/// Returns the most frequent opaque, non-near-white color of a template.
///
/// Only pixels with nonzero alpha are counted; colors whose every channel
/// is at or above `near_white_threshold` are dropped from the ranking so a
/// white or transparent background never wins. Returns `None` when no
/// qualifying pixel exists.
///
/// Frequency ties resolve to the color first encountered in row-major
/// pixel order, which keeps the result independent of hash-map iteration
/// order.
pub fn dominant_color(template: &Template, near_white_threshold: u8) -> Option<Rgb> {
    let rgb = template.rgb();
    let mut tallies: HashMap<Rgb, Tally> = HashMap::new();

    let mut idx = 0usize;
    for y in 0..rgb.height() {
        for x in 0..rgb.width() {
            if template.is_opaque(idx) {
                let color = rgb.pixel(x, y);
                tallies
                    .entry(color)
                    .and_modify(|t| t.count += 1)
                    .or_insert(Tally {
                        count: 1,
                        first_seen: idx,
                    });
            }
            idx += 1;
        }
    }

    tallies
        .into_iter()
        .filter(|(color, _)| !color.is_near_white(near_white_threshold))
        .max_by(|(_, a), (_, b)| {
            a.count
                .cmp(&b.count)
                .then_with(|| b.first_seen.cmp(&a.first_seen))
        })
        .map(|(color, _)| color)
}
