//! Per-template localization pipeline.
//!
//! Wires the four stages together: dominant color, region isolation, edge
//! transform, multi-scale matching. Each template is an independent
//! invocation; nothing is shared across templates, so a caller may batch
//! or parallelize invocations however it likes.

use crate::color::{dominant_color, isolate_regions};
use crate::edges::{edge_map, EdgeConfig};
use crate::image::RgbImage;
use crate::search::{match_multi_scale, MatchResult, ScaleRange};
use crate::template::Template;
use crate::trace::{trace_event, trace_span};
use crate::util::ChromatchResult;

/// Configuration bundle for the localization pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Per-channel floor above which a template color counts as background.
    pub near_white_threshold: u8,
    /// Maximum Euclidean RGB distance for region isolation.
    pub color_tolerance: f32,
    /// Structuring element side length for mask dilation.
    pub dilation_size: usize,
    /// Edge transform parameters, shared by target regions and templates.
    pub edge: EdgeConfig,
    /// Matcher scale search range.
    pub scales: ScaleRange,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            near_white_threshold: 240,
            color_tolerance: 30.0,
            dilation_size: 20,
            edge: EdgeConfig::default(),
            scales: ScaleRange::default(),
        }
    }
}

impl PipelineConfig {
    /// Settings tuned for locating small logo-like templates in
    /// photographs: a tight color tolerance, a wide dilation to merge
    /// fragments, and the recommended edge transform.
    pub fn recommended() -> Self {
        Self {
            color_tolerance: 3.0,
            dilation_size: 40,
            edge: EdgeConfig::recommended(),
            ..Self::default()
        }
    }
}

/// Result of running the pipeline for one template.
///
/// The two skip variants are data conditions, not errors: processing of
/// other templates continues and no best-effort guess is ever reported in
/// their place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TemplateOutcome {
    /// The template was located.
    Match(MatchResult),
    /// The template has no opaque, non-near-white pixel.
    NoDominantColor,
    /// Every tested scale left the candidate smaller than the template.
    NoMatch,
}

impl TemplateOutcome {
    /// Returns the match result, if the template was located.
    pub fn as_match(&self) -> Option<&MatchResult> {
        match self {
            TemplateOutcome::Match(result) => Some(result),
            _ => None,
        }
    }
}

/// Locates one template inside a target image.
pub fn locate(
    target: &RgbImage,
    template: &Template,
    cfg: &PipelineConfig,
) -> ChromatchResult<TemplateOutcome> {
    let _span = trace_span!(
        "locate",
        tpl_width = template.width(),
        tpl_height = template.height()
    )
    .entered();

    let color = match dominant_color(template, cfg.near_white_threshold) {
        Some(color) => color,
        None => {
            trace_event!("template_skipped");
            return Ok(TemplateOutcome::NoDominantColor);
        }
    };

    let (extracted, _mask) =
        isolate_regions(target, color, cfg.color_tolerance, cfg.dilation_size)?;

    let candidate_edges = edge_map(&extracted, &cfg.edge)?;
    let template_edges = edge_map(template.rgb(), &cfg.edge)?;

    match match_multi_scale(&candidate_edges, &template_edges, &cfg.scales)? {
        Some(result) => {
            trace_event!(
                "template_located",
                score = result.score as f64,
                scale = result.scale as f64
            );
            Ok(TemplateOutcome::Match(result))
        }
        None => Ok(TemplateOutcome::NoMatch),
    }
}

/// Locates every template of a set inside a target image.
///
/// Outcomes are returned in template order. Per-template skip conditions
/// never abort the batch; only configuration or structural errors do.
pub fn locate_all(
    target: &RgbImage,
    templates: &[Template],
    cfg: &PipelineConfig,
) -> ChromatchResult<Vec<TemplateOutcome>> {
    templates
        .iter()
        .map(|template| locate(target, template, cfg))
        .collect()
}
