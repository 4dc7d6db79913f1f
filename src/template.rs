//! Template storage: a color image plus optional per-pixel transparency.

use crate::image::RgbImage;
use crate::util::{ChromatchError, ChromatchResult};

/// Reference image to locate inside a target, with optional alpha channel.
///
/// Channel order is RGB, matching the rest of the crate. A template without
/// an alpha channel is treated as fully opaque.
#[derive(Clone, Debug)]
pub struct Template {
    rgb: RgbImage,
    alpha: Option<Vec<u8>>,
}

impl Template {
    /// Creates a fully opaque template.
    pub fn new(rgb: RgbImage) -> Self {
        Self { rgb, alpha: None }
    }

    /// Creates a template with a transparency channel.
    ///
    /// `alpha` is row-major with one byte per pixel; 0 means fully
    /// transparent and anything nonzero counts as opaque.
    pub fn with_alpha(rgb: RgbImage, alpha: Vec<u8>) -> ChromatchResult<Self> {
        let expected = rgb.width() * rgb.height();
        if alpha.len() != expected {
            return Err(ChromatchError::AlphaLengthMismatch {
                expected,
                got: alpha.len(),
            });
        }
        Ok(Self {
            rgb,
            alpha: Some(alpha),
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.rgb.width()
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.rgb.height()
    }

    /// Returns the color image.
    pub fn rgb(&self) -> &RgbImage {
        &self.rgb
    }

    /// Returns true when the pixel at row-major index `idx` is opaque.
    pub fn is_opaque(&self, idx: usize) -> bool {
        match &self.alpha {
            Some(alpha) => alpha[idx] > 0,
            None => true,
        }
    }
}
