//! Image quality metrics.
//!
//! All four metrics are computed on the BT.601 luma channel:
//!
//! - **brightness**: mean luma, `[0, 255]`
//! - **contrast**: luma standard deviation, scaled so that 128 maps to 100
//! - **sharpness**: RMS of the 4-neighbour Laplacian, scaled so that 50 maps
//!   to 100
//! - **noise**: mean absolute difference between a pixel and the average of
//!   its 4 neighbours, scaled so that 30 maps to 100
//!
//! Sharpness and noise look at interior pixels only; an image without
//! interior pixels (width or height below 3) scores 0 on both.

use fuzzy_infer::ImageMetrics;

use super::RgbaImage;

const CONTRAST_FULL_SCALE: f64 = 128.0;
const SHARPNESS_FULL_SCALE: f64 = 50.0;
const NOISE_FULL_SCALE: f64 = 30.0;

/// Measure all four metrics.
pub fn analyze(image: &RgbaImage) -> ImageMetrics {
    let gray = image.grayscale();
    let width = image.width() as usize;
    let height = image.height() as usize;

    let brightness = mean(&gray);
    ImageMetrics {
        brightness,
        contrast: contrast(&gray, brightness),
        sharpness: sharpness(&gray, width, height),
        noise: noise(&gray, width, height),
    }
}

/// Luma histogram with 256 bins (luma rounded to the nearest integer).
pub fn histogram(image: &RgbaImage) -> Vec<u32> {
    let mut bins = vec![0u32; 256];
    for p in image.data().chunks_exact(4) {
        let v = super::luma(p[0], p[1], p[2]).round().clamp(0.0, 255.0) as usize;
        bins[v] += 1;
    }
    bins
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn contrast(gray: &[f64], mean: f64) -> f64 {
    let variance = gray.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / gray.len() as f64;
    scale(variance.sqrt(), CONTRAST_FULL_SCALE)
}

fn sharpness(gray: &[f64], width: usize, height: usize) -> f64 {
    let mut energy = 0.0;
    let mut count = 0usize;
    for_each_interior(width, height, |i| {
        let laplacian = gray[i - 1] + gray[i + 1] + gray[i - width] + gray[i + width] - 4.0 * gray[i];
        energy += laplacian * laplacian;
        count += 1;
    });
    if count == 0 {
        return 0.0;
    }
    scale((energy / count as f64).sqrt(), SHARPNESS_FULL_SCALE)
}

fn noise(gray: &[f64], width: usize, height: usize) -> f64 {
    let mut variation = 0.0;
    let mut count = 0usize;
    for_each_interior(width, height, |i| {
        let neighbours = (gray[i - 1] + gray[i + 1] + gray[i - width] + gray[i + width]) / 4.0;
        variation += (gray[i] - neighbours).abs();
        count += 1;
    });
    if count == 0 {
        return 0.0;
    }
    scale(variation / count as f64, NOISE_FULL_SCALE)
}

/// Call `f` with the flat index of every pixel that has all four neighbours.
fn for_each_interior(width: usize, height: usize, mut f: impl FnMut(usize)) {
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            f(y * width + x);
        }
    }
}

#[inline]
fn scale(value: f64, full_scale: f64) -> f64 {
    (value / full_scale * 100.0).min(100.0)
}
