//! In-memory RGBA images and the pixel operations around inference.
//!
//! - [`codec`]: PNG decoding (any colour type) and RGBA encoding
//! - [`analysis`]: the four quality metrics fed to the fuzzy engine
//! - [`adjust`]: brightness, contrast, sharpen and denoise filters

pub mod adjust;
pub mod analysis;
pub mod codec;

pub use adjust::apply_enhancements;
pub use analysis::{analyze, histogram};
pub use codec::{decode_png, decode_png_limited, encode_png};

use crate::error::ImagingError;

/// 8-bit RGBA image, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Wrap a raw RGBA buffer.
    ///
    /// Fails if either dimension is zero or the buffer is not exactly
    /// `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ImagingError> {
        if width == 0 || height == 0 {
            return Err(ImagingError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ImagingError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image with every pixel set by `f(x, y)`.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Result<Self, ImagingError> {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, data)
    }

    /// Single-colour image.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, ImagingError> {
        Self::from_fn(width, height, |_, _| rgba)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// RGBA of the pixel at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    #[inline]
    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Same dimensions, new pixel buffer.
    pub(crate) fn with_data(&self, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Luma of every pixel (`0.299 R + 0.587 G + 0.114 B`), row-major.
    pub fn grayscale(&self) -> Vec<f64> {
        self.data
            .chunks_exact(4)
            .map(|p| luma(p[0], p[1], p[2]))
            .collect()
    }
}

/// ITU-R BT.601 luma.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// Store a filtered value the way a clamped byte array would: clamp to
/// `[0, 255]` and round half to even.
#[inline]
pub(crate) fn clamp_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}
