//! Multi-scale correlation matching of edge maps.

use crate::image::resize::{resize_area, scaled_dims};
use crate::image::Mask;
use crate::search::scan::{scan_ccorr_normed, CorrPlan, ScanPeak};
use crate::trace::{trace_event, trace_span};
use crate::util::{ChromatchError, ChromatchResult};

const SCALE_EPS: f64 = 1e-6;

/// Inclusive scale search range with an arithmetic step.
///
/// The sweep covers `min, min + step, ...` and deliberately runs one step
/// past `max`, mirroring the half-open-range idiom of the pipeline this
/// crate reimplements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleRange {
    /// Smallest scale factor tested.
    pub min: f32,
    /// Nominal largest scale factor; the sweep includes one extra step.
    pub max: f32,
    /// Arithmetic step between tested scales.
    pub step: f32,
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 1.5,
            step: 0.1,
        }
    }
}

impl ScaleRange {
    /// Creates a validated scale range.
    pub fn new(min: f32, max: f32, step: f32) -> ChromatchResult<Self> {
        let range = Self { min, max, step };
        range.validate()?;
        Ok(range)
    }

    fn validate(&self) -> ChromatchResult<()> {
        if !(self.min > 0.0) || !(self.max >= self.min) || !(self.step > 0.0) {
            return Err(ChromatchError::InvalidScaleRange {
                min: self.min,
                max: self.max,
                step: self.step,
            });
        }
        Ok(())
    }

    /// Tested scale values, generated by index to avoid accumulation drift.
    pub(crate) fn scales(&self) -> impl Iterator<Item = f32> {
        let min = self.min as f64;
        let max = self.max as f64;
        let step = self.step as f64;
        (0u32..)
            .map(move |k| min + k as f64 * step)
            .take_while(move |&s| s <= max + step + SCALE_EPS)
            .map(|s| s as f32)
    }
}

/// Best match found by the multi-scale sweep.
///
/// Coordinates are in the candidate's original, unscaled space; the
/// bounding box always has the template's unscaled dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult {
    /// Top-left corner of the bounding box.
    pub top_left: (u32, u32),
    /// Bottom-right corner: top-left plus the template size.
    pub bottom_right: (u32, u32),
    /// Winning scale factor applied to the candidate.
    pub scale: f32,
    /// Winning normalized correlation score in [0, 1].
    pub score: f32,
}

/// Correlates a template edge map against a candidate edge map over a
/// range of scales.
///
/// For each tested scale the candidate is resized by area averaging and
/// scanned with the unscaled template; scales that shrink the candidate
/// below the template size in either dimension are skipped. The running
/// best is replaced only on a strictly greater score, so ties keep the
/// first-encountered (smaller) scale. The winning position maps back to
/// original coordinates by truncating division by the winning scale.
///
/// Returns `Ok(None)` when every scale was skipped.
pub fn match_multi_scale(
    candidate: &Mask,
    template: &Mask,
    range: &ScaleRange,
) -> ChromatchResult<Option<MatchResult>> {
    range.validate()?;

    let tpl_width = template.width();
    let tpl_height = template.height();
    let _span = trace_span!(
        "multi_scale_match",
        tpl_width = tpl_width,
        tpl_height = tpl_height
    )
    .entered();

    let plan = CorrPlan::from_mask(template);
    let mut best: Option<(ScanPeak, f32)> = None;

    for scale in range.scales() {
        let (dst_w, dst_h) = scaled_dims(candidate.width(), candidate.height(), scale);
        if dst_w < plan.width() || dst_h < plan.height() {
            continue;
        }
        let resized = resize_area(candidate.view(), dst_w, dst_h)?;
        let peak = match scan_ccorr_normed(resized.view(), &plan) {
            Some(peak) => peak,
            None => continue,
        };
        trace_event!("scale_scored", score = peak.score as f64);

        let replaces = match &best {
            None => true,
            Some((incumbent, _)) => peak.score > incumbent.score,
        };
        if replaces {
            best = Some((peak, scale));
        }
    }

    let (peak, scale) = match best {
        Some(found) => found,
        None => return Ok(None),
    };

    let orig_x = (peak.x as f64 / scale as f64) as u32;
    let orig_y = (peak.y as f64 / scale as f64) as u32;
    Ok(Some(MatchResult {
        top_left: (orig_x, orig_y),
        bottom_right: (orig_x + tpl_width as u32, orig_y + tpl_height as u32),
        scale,
        score: peak.score,
    }))
}
