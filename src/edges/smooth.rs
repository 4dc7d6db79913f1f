//! Pre-edge-detection smoothing filters.
//!
//! All three filters clamp coordinates at the image border (replicated
//! edge pixels) and are fully deterministic.

use crate::image::GrayImage;
use crate::util::{ChromatchError, ChromatchResult};
use std::str::FromStr;

/// Bilateral filter neighborhood diameter, matching the pipeline this
/// crate reimplements.
const BILATERAL_DIAMETER: usize = 9;
const BILATERAL_SIGMA_COLOR: f64 = 10.0;
const BILATERAL_SIGMA_SPACE: f64 = 75.0;

/// Noise-suppression filter applied before edge detection.
///
/// This is a closed set; configuration strings outside it are rejected at
/// parse time rather than silently defaulted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmoothingMethod {
    /// Separable Gaussian blur with a sigma derived from the kernel size.
    Gaussian,
    /// Edge-preserving bilateral filter with a fixed 9-pixel diameter.
    Bilateral,
    /// Square median filter.
    Median,
}

impl SmoothingMethod {
    /// Returns the lowercase configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            SmoothingMethod::Gaussian => "gaussian",
            SmoothingMethod::Bilateral => "bilateral",
            SmoothingMethod::Median => "median",
        }
    }
}

impl std::fmt::Display for SmoothingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SmoothingMethod {
    type Err = ChromatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gaussian" => Ok(SmoothingMethod::Gaussian),
            "bilateral" => Ok(SmoothingMethod::Bilateral),
            "median" => Ok(SmoothingMethod::Median),
            other => Err(ChromatchError::InvalidSmoothingMethod {
                name: other.to_string(),
            }),
        }
    }
}

/// Applies the selected smoothing filter.
///
/// `kernel_size` applies to the Gaussian and median filters and must be
/// odd and at least 3; the bilateral filter uses its fixed diameter.
pub(crate) fn smooth(
    src: &GrayImage,
    method: SmoothingMethod,
    kernel_size: usize,
) -> ChromatchResult<GrayImage> {
    match method {
        SmoothingMethod::Gaussian => gaussian_blur(src, kernel_size),
        SmoothingMethod::Bilateral => bilateral_filter(src),
        SmoothingMethod::Median => median_filter(src, kernel_size),
    }
}

fn check_kernel(size: usize) -> ChromatchResult<()> {
    if size < 3 || size % 2 == 0 {
        return Err(ChromatchError::InvalidKernelSize { size });
    }
    Ok(())
}

fn clamp(v: isize, max: usize) -> usize {
    v.clamp(0, max as isize - 1) as usize
}

/// Separable Gaussian blur.
///
/// Sigma follows the usual size-derived formula
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`, so a 5-tap kernel uses 1.1.
pub(crate) fn gaussian_blur(src: &GrayImage, kernel_size: usize) -> ChromatchResult<GrayImage> {
    check_kernel(kernel_size)?;
    let width = src.width();
    let height = src.height();
    let radius = (kernel_size / 2) as isize;

    let sigma = 0.3 * ((kernel_size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let denom = 2.0 * sigma * sigma;
    let mut kernel = Vec::with_capacity(kernel_size);
    let mut sum = 0.0f64;
    for i in 0..kernel_size {
        let d = i as f64 - radius as f64;
        let w = (-d * d / denom).exp();
        kernel.push(w);
        sum += w;
    }
    for w in kernel.iter_mut() {
        *w /= sum;
    }

    // Horizontal pass into f64, vertical pass with final rounding.
    let mut mid = vec![0.0f64; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f64;
            for (i, w) in kernel.iter().enumerate() {
                let sx = clamp(x as isize + i as isize - radius, width);
                acc += src.at(sx, y) as f64 * w;
            }
            mid[y * width + x] = acc;
        }
    }

    let mut data = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f64;
            for (i, w) in kernel.iter().enumerate() {
                let sy = clamp(y as isize + i as isize - radius, height);
                acc += mid[sy * width + x] * w;
            }
            data[y * width + x] = acc.round().clamp(0.0, 255.0) as u8;
        }
    }
    GrayImage::new(data, width, height)
}

/// Edge-preserving bilateral filter with fixed diameter and sigmas.
pub(crate) fn bilateral_filter(src: &GrayImage) -> ChromatchResult<GrayImage> {
    let width = src.width();
    let height = src.height();
    let radius = (BILATERAL_DIAMETER / 2) as isize;

    let space_denom = 2.0 * BILATERAL_SIGMA_SPACE * BILATERAL_SIGMA_SPACE;
    let color_denom = 2.0 * BILATERAL_SIGMA_COLOR * BILATERAL_SIGMA_COLOR;

    let mut space = vec![0.0f64; BILATERAL_DIAMETER * BILATERAL_DIAMETER];
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let idx = ((dy + radius) * BILATERAL_DIAMETER as isize + dx + radius) as usize;
            space[idx] = (-((dx * dx + dy * dy) as f64) / space_denom).exp();
        }
    }
    let mut color_lut = [0.0f64; 256];
    for (d, slot) in color_lut.iter_mut().enumerate() {
        *slot = (-((d * d) as f64) / color_denom).exp();
    }

    let mut data = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let center = src.at(x, y);
            let mut acc = 0.0f64;
            let mut norm = 0.0f64;
            for dy in -radius..=radius {
                let sy = clamp(y as isize + dy, height);
                for dx in -radius..=radius {
                    let sx = clamp(x as isize + dx, width);
                    let value = src.at(sx, sy);
                    let sw = space
                        [((dy + radius) * BILATERAL_DIAMETER as isize + dx + radius) as usize];
                    let cw = color_lut[(value as i16 - center as i16).unsigned_abs() as usize];
                    let w = sw * cw;
                    acc += value as f64 * w;
                    norm += w;
                }
            }
            data[y * width + x] = (acc / norm).round().clamp(0.0, 255.0) as u8;
        }
    }
    GrayImage::new(data, width, height)
}

/// Square median filter.
pub(crate) fn median_filter(src: &GrayImage, kernel_size: usize) -> ChromatchResult<GrayImage> {
    check_kernel(kernel_size)?;
    let width = src.width();
    let height = src.height();
    let radius = (kernel_size / 2) as isize;

    let mut window = Vec::with_capacity(kernel_size * kernel_size);
    let mut data = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            window.clear();
            for dy in -radius..=radius {
                let sy = clamp(y as isize + dy, height);
                for dx in -radius..=radius {
                    let sx = clamp(x as isize + dx, width);
                    window.push(src.at(sx, sy));
                }
            }
            window.sort_unstable();
            data[y * width + x] = window[window.len() / 2];
        }
    }
    GrayImage::new(data, width, height)
}

#[cfg(test)]
mod tests {
    use super::{gaussian_blur, median_filter, smooth, SmoothingMethod};
    use crate::image::GrayImage;
    use crate::util::ChromatchError;

    #[test]
    fn smoothing_method_parses_recognized_names() {
        assert_eq!(
            "gaussian".parse::<SmoothingMethod>().unwrap(),
            SmoothingMethod::Gaussian
        );
        assert_eq!(
            "bilateral".parse::<SmoothingMethod>().unwrap(),
            SmoothingMethod::Bilateral
        );
        assert_eq!(
            "median".parse::<SmoothingMethod>().unwrap(),
            SmoothingMethod::Median
        );
    }

    #[test]
    fn smoothing_method_rejects_unknown_names() {
        let err = "box".parse::<SmoothingMethod>().unwrap_err();
        assert_eq!(
            err,
            ChromatchError::InvalidSmoothingMethod {
                name: "box".to_string()
            }
        );
    }

    #[test]
    fn even_kernel_sizes_are_rejected() {
        let img = GrayImage::filled(8, 8, 100).unwrap();
        let err = smooth(&img, SmoothingMethod::Gaussian, 4).unwrap_err();
        assert_eq!(err, ChromatchError::InvalidKernelSize { size: 4 });
        let err = smooth(&img, SmoothingMethod::Median, 1).unwrap_err();
        assert_eq!(err, ChromatchError::InvalidKernelSize { size: 1 });
    }

    #[test]
    fn gaussian_preserves_constant_images() {
        let img = GrayImage::filled(16, 9, 77).unwrap();
        let out = gaussian_blur(&img, 5).unwrap();
        assert_eq!(out.as_slice(), img.as_slice());
    }

    #[test]
    fn median_removes_salt_noise() {
        let mut img = GrayImage::filled(9, 9, 50).unwrap();
        img.put(4, 4, 255);
        let out = median_filter(&img, 3).unwrap();
        assert_eq!(out.at(4, 4), 50);
    }
}
