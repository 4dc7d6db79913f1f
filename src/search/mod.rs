//! Multi-scale edge correlation search.

mod multiscale;
pub(crate) mod scan;

pub use multiscale::{match_multi_scale, MatchResult, ScaleRange};
