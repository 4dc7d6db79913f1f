//! Error types for chromatch.

use thiserror::Error;

/// Result alias for chromatch operations.
pub type ChromatchResult<T> = std::result::Result<T, ChromatchError>;

/// Errors that can occur while running the localization pipeline.
///
/// Per-template "no dominant color" and "no match" conditions are not
/// errors; they are reported through
/// [`TemplateOutcome`](crate::pipeline::TemplateOutcome).
#[derive(Debug, Error, PartialEq)]
pub enum ChromatchError {
    /// An image or mask was constructed with a zero dimension.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// A backing buffer is shorter than the dimensions require.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A row stride is smaller than the image width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// A smoothing kernel size is even or too small.
    #[error("invalid smoothing kernel size {size}: must be odd and >= 3")]
    InvalidKernelSize { size: usize },
    /// Hysteresis thresholds where the low bound does not sit below the
    /// high bound.
    #[error("invalid hysteresis thresholds: low {low} must be below high {high}")]
    InvalidCannyThresholds { low: f32, high: f32 },
    /// A scale range is empty or has a non-positive step.
    #[error("invalid scale range [{min}, {max}] with step {step}")]
    InvalidScaleRange { min: f32, max: f32, step: f32 },
    /// A smoothing method name is outside the recognized set.
    ///
    /// This is a configuration error and is never silently defaulted.
    #[error("invalid smoothing method {name:?}: expected gaussian, bilateral or median")]
    InvalidSmoothingMethod { name: String },
    /// An alpha channel length does not match the pixel count.
    #[error("alpha channel length {got} does not match pixel count {expected}")]
    AlphaLengthMismatch { expected: usize, got: usize },
    /// Failure while decoding an external image (feature `image-io`).
    #[cfg(feature = "image-io")]
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
