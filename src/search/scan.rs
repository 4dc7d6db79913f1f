//! Normalized cross-correlation scan over a single candidate field.

use crate::image::{ImageView, Mask};

/// Precomputed template buffer and energy for correlation scoring.
pub(crate) struct CorrPlan {
    width: usize,
    height: usize,
    values: Vec<f32>,
    energy: f64,
}

impl CorrPlan {
    /// Builds a plan from a binary edge mask.
    pub(crate) fn from_mask(template: &Mask) -> Self {
        let mut values = Vec::with_capacity(template.width() * template.height());
        let mut energy = 0.0f64;
        for &v in template.as_slice() {
            let f = v as f32;
            energy += (f as f64) * (f as f64);
            values.push(f);
        }
        Self {
            width: template.width(),
            height: template.height(),
            values,
            energy,
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }
}

/// Global correlation maximum within a scan.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScanPeak {
    pub(crate) x: usize,
    pub(crate) y: usize,
    pub(crate) score: f32,
}

/// Scans every placement of the template over `image` and returns the
/// global maximum of the normalized cross-correlation surface.
///
/// The score at a placement is `sum(I*T) / sqrt(sum(I^2) * sum(T^2))`,
/// which lies in [0, 1] for non-negative pixel data. Placements where
/// either operand has zero energy score 0. The maximum is taken with
/// strict `>` in row-major order, so equal scores keep the first
/// placement encountered. Returns `None` when the image is smaller than
/// the template in either dimension.
pub(crate) fn scan_ccorr_normed(image: ImageView<'_, u8>, plan: &CorrPlan) -> Option<ScanPeak> {
    let img_width = image.width();
    let img_height = image.height();
    let tpl_width = plan.width;
    let tpl_height = plan.height;
    if img_width < tpl_width || img_height < tpl_height {
        return None;
    }

    let max_x = img_width - tpl_width;
    let max_y = img_height - tpl_height;

    let mut best: Option<ScanPeak> = None;
    for y in 0..=max_y {
        for x in 0..=max_x {
            let mut dot = 0.0f64;
            let mut sum_i2 = 0.0f64;
            for ty in 0..tpl_height {
                let img_row = &image.row(y + ty)?[x..x + tpl_width];
                let tpl_row = &plan.values[ty * tpl_width..(ty + 1) * tpl_width];
                for (ival, tval) in img_row.iter().zip(tpl_row) {
                    let i = *ival as f64;
                    dot += i * (*tval as f64);
                    sum_i2 += i * i;
                }
            }

            let denom = (plan.energy * sum_i2).sqrt();
            let score = if denom > 0.0 { (dot / denom) as f32 } else { 0.0 };
            let better = match best {
                None => true,
                Some(b) => score > b.score,
            };
            if better {
                best = Some(ScanPeak { x, y, score });
            }
        }
    }
    best
}
