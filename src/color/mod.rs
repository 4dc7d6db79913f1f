//! Color-based template analysis and region isolation.
//!
//! These are the first two pipeline stages: pick the dominant color of a
//! template, then carve the target down to regions of similar color so the
//! edge matcher only sees plausible candidates.

mod dominant;
mod isolate;

pub use dominant::dominant_color;
pub use isolate::isolate_regions;
