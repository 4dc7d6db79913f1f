//! Conversions from the `image` crate at the ingestion boundary.
//!
//! Available when the `image-io` feature is enabled. The `image` crate
//! already stores pixels in RGB(A) order, so these helpers copy without
//! reordering channels; this is the only place external representations
//! enter the pipeline.

use crate::image::RgbImage;
use crate::template::Template;
use crate::util::{ChromatchError, ChromatchResult};
use std::path::Path;

/// Creates an owned RGB image from an `image::RgbImage` buffer.
pub fn rgb_from_image(img: &image::RgbImage) -> ChromatchResult<RgbImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    RgbImage::new(img.as_raw().clone(), width, height)
}

/// Creates an owned RGB image from a dynamic image, discarding alpha.
pub fn rgb_from_dynamic(img: &image::DynamicImage) -> ChromatchResult<RgbImage> {
    rgb_from_image(&img.to_rgb8())
}

/// Creates a template from an `image::RgbaImage`, splitting off the alpha
/// channel.
pub fn template_from_rgba(img: &image::RgbaImage) -> ChromatchResult<Template> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let mut rgb = Vec::with_capacity(width * height * 3);
    let mut alpha = Vec::with_capacity(width * height);
    for px in img.pixels() {
        rgb.extend_from_slice(&px.0[..3]);
        alpha.push(px.0[3]);
    }
    Template::with_alpha(RgbImage::new(rgb, width, height)?, alpha)
}

/// Loads a target image from disk as an RGB pixel grid.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> ChromatchResult<RgbImage> {
    let img = image::open(path).map_err(|err| ChromatchError::ImageIo {
        reason: err.to_string(),
    })?;
    rgb_from_dynamic(&img)
}

/// Loads a template from disk, keeping its transparency channel.
pub fn load_template<P: AsRef<Path>>(path: P) -> ChromatchResult<Template> {
    let img = image::open(path).map_err(|err| ChromatchError::ImageIo {
        reason: err.to_string(),
    })?;
    template_from_rgba(&img.to_rgba8())
}
