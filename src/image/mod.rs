//! Pixel buffers and views for the localization pipeline.
//!
//! The canonical channel order everywhere in this crate is **RGB**. Colors
//! and color images are only ever converted at ingestion boundaries (see
//! the `image-io` feature); no pipeline stage reorders channels.
//!
//! `ImageView` is a borrowed 2D view into a single-channel buffer with an
//! explicit stride. The stride counts elements between the starts of
//! consecutive rows, so a stride larger than the width represents padded
//! rows.

use crate::util::{ChromatchError, ChromatchResult};

#[cfg(feature = "image-io")]
pub mod io;
pub mod resize;

/// Color tuple in RGB channel order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Red channel.
    pub fn r(self) -> u8 {
        self.0[0]
    }

    /// Green channel.
    pub fn g(self) -> u8 {
        self.0[1]
    }

    /// Blue channel.
    pub fn b(self) -> u8 {
        self.0[2]
    }

    /// Euclidean distance to another color in RGB space.
    pub fn distance(self, other: Rgb) -> f32 {
        let mut acc = 0.0f32;
        for c in 0..3 {
            let d = self.0[c] as f32 - other.0[c] as f32;
            acc += d * d;
        }
        acc.sqrt()
    }

    /// True when every channel is at or above `threshold`.
    pub fn is_near_white(self, threshold: u8) -> bool {
        self.0.iter().all(|&c| c >= threshold)
    }
}

/// Borrowed single-channel 2D view with an explicit stride.
#[derive(Copy, Clone)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> ChromatchResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [T],
        width: usize,
        height: usize,
        stride: usize,
    ) -> ChromatchResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(ChromatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the view width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the view height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> ChromatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(ChromatchError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(ChromatchError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(ChromatchError::InvalidDimensions { width, height })?;
    Ok(needed)
}

/// Owned contiguous single-channel `u8` image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl GrayImage {
    /// Creates an image from a contiguous buffer of exactly `width * height` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> ChromatchResult<Self> {
        let needed = checked_area(width, height)?;
        if data.len() < needed {
            return Err(ChromatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(ChromatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image filled with a constant value.
    pub fn filled(width: usize, height: usize, value: u8) -> ChromatchResult<Self> {
        let len = checked_area(width, height)?;
        Ok(Self {
            data: vec![value; len],
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the backing row-major slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns the value at `(x, y)`; panics if out of bounds.
    pub fn at(&self, x: usize, y: usize) -> u8 {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x]
    }

    pub(crate) fn put(&mut self, x: usize, y: usize, value: u8) {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x] = value;
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

/// Owned contiguous interleaved 3-channel `u8` image in RGB order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl RgbImage {
    /// Creates an image from an interleaved RGB buffer of exactly
    /// `3 * width * height` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> ChromatchResult<Self> {
        let area = checked_area(width, height)?;
        let needed = area
            .checked_mul(3)
            .ok_or(ChromatchError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(ChromatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(ChromatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an all-black image.
    pub fn zeros(width: usize, height: usize) -> ChromatchResult<Self> {
        let len = checked_area(width, height)?
            .checked_mul(3)
            .ok_or(ChromatchError::InvalidDimensions { width, height })?;
        Ok(Self {
            data: vec![0u8; len],
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the interleaved RGB backing slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns the pixel at `(x, y)`; panics if out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        debug_assert!(x < self.width && y < self.height);
        let idx = (y * self.width + x) * 3;
        Rgb([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Writes the pixel at `(x, y)`; panics if out of bounds.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        debug_assert!(x < self.width && y < self.height);
        let idx = (y * self.width + x) * 3;
        self.data[idx..idx + 3].copy_from_slice(&color.0);
    }
}

/// Binary image holding only the values 0 and 255.
///
/// Masks always have the same spatial dimensions as the image they were
/// derived from. Construction normalizes any nonzero input to 255 so the
/// invariant holds by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    inner: GrayImage,
}

impl Mask {
    /// Creates a mask from raw bytes, mapping every nonzero value to 255.
    pub fn from_raw(data: Vec<u8>, width: usize, height: usize) -> ChromatchResult<Self> {
        let mut img = GrayImage::new(data, width, height)?;
        for value in img.data.iter_mut() {
            if *value != 0 {
                *value = 255;
            }
        }
        Ok(Self { inner: img })
    }

    /// Creates an all-clear mask.
    pub fn empty(width: usize, height: usize) -> ChromatchResult<Self> {
        Ok(Self {
            inner: GrayImage::filled(width, height, 0)?,
        })
    }

    /// Returns the mask width in pixels.
    pub fn width(&self) -> usize {
        self.inner.width()
    }

    /// Returns the mask height in pixels.
    pub fn height(&self) -> usize {
        self.inner.height()
    }

    /// Returns true when the pixel at `(x, y)` is set.
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.inner.at(x, y) != 0
    }

    pub(crate) fn set(&mut self, x: usize, y: usize) {
        self.inner.put(x, y, 255);
    }

    /// Returns the number of set pixels.
    pub fn count_set(&self) -> usize {
        self.inner.data.iter().filter(|&&v| v != 0).count()
    }

    /// Returns the backing row-major slice (values 0 or 255).
    pub fn as_slice(&self) -> &[u8] {
        self.inner.as_slice()
    }

    /// Returns a borrowed single-channel view of the mask.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.inner.view()
    }

    /// Returns the underlying single-channel image.
    pub fn as_gray(&self) -> &GrayImage {
        &self.inner
    }
}

fn checked_area(width: usize, height: usize) -> ChromatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(ChromatchError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(ChromatchError::InvalidDimensions { width, height })
}
