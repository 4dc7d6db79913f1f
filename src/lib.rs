//! Chromatch locates scaled instances of small reference images inside a
//! larger target photograph, without any trained model.
//!
//! The pipeline is color-guided: each template's dominant color carves the
//! target down to plausible regions, both sides are reduced to binary edge
//! maps, and a brute-force multi-scale normalized cross-correlation sweep
//! picks the best placement and scale.
//!
//! The canonical channel order throughout the crate is RGB; external
//! representations are converted only at ingestion (see the `image-io`
//! feature). Everything is single-threaded and deterministic.

pub mod color;
pub mod edges;
pub mod image;
pub mod pipeline;
pub mod search;
pub mod template;
pub(crate) mod trace;
pub mod util;

pub use color::{dominant_color, isolate_regions};
pub use edges::{edge_map, EdgeConfig, SmoothingMethod};
pub use image::{GrayImage, ImageView, Mask, Rgb, RgbImage};
pub use pipeline::{locate, locate_all, PipelineConfig, TemplateOutcome};
pub use search::{match_multi_scale, MatchResult, ScaleRange};
pub use template::Template;
pub use util::{ChromatchError, ChromatchResult};
