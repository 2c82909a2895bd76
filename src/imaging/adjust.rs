//! Enhancement filters.
//!
//! Every filter returns a new image. Brightness and contrast keep the alpha
//! channel; sharpen and denoise write opaque pixels.

use fuzzy_infer::EnhancementParameters;

use super::{clamp_u8, RgbaImage};

/// Add `adjustment` to each colour channel.
pub fn adjust_brightness(image: &RgbaImage, adjustment: f64) -> RgbaImage {
    map_rgb(image, |v| v + adjustment)
}

/// Scale each colour channel's distance from mid-grey (128) by `factor`.
pub fn adjust_contrast(image: &RgbaImage, factor: f64) -> RgbaImage {
    map_rgb(image, |v| (v - 128.0) * factor + 128.0)
}

/// Unsharp 4-neighbour kernel at `amount` percent.
///
/// The kernel centre is `1 + 4i` and each neighbour `-i`, with
/// `i = amount / 100`. Border pixels keep their colour. An amount of 0
/// returns the image unchanged.
pub fn sharpen(image: &RgbaImage, amount: f64) -> RgbaImage {
    if amount == 0.0 {
        return image.clone();
    }

    let intensity = amount / 100.0;
    let centre = 1.0 + 4.0 * intensity;
    let width = image.width();
    let height = image.height();
    let row = width as usize * 4;
    let src = image.data();
    let mut out = vec![0u8; src.len()];

    for y in 0..height {
        for x in 0..width {
            let base = image.offset(x, y);
            let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
            for c in 0..3 {
                let i = base + c;
                out[i] = if border {
                    src[i]
                } else {
                    let neighbours =
                        src[i - 4] as f64 + src[i + 4] as f64 + src[i - row] as f64 + src[i + row] as f64;
                    clamp_u8(src[i] as f64 * centre - intensity * neighbours)
                };
            }
            out[base + 3] = 255;
        }
    }

    image.with_data(out)
}

/// Box blur whose radius grows with `strength` percent.
///
/// Radius is `ceil(strength / 100 * 3)`; samples past the edge repeat the
/// edge pixel. A strength of 0 returns the image unchanged.
pub fn denoise(image: &RgbaImage, strength: f64) -> RgbaImage {
    if strength == 0.0 {
        return image.clone();
    }

    let radius = (strength / 100.0 * 3.0).ceil().max(0.0) as i64;
    let width = image.width() as i64;
    let height = image.height() as i64;
    let src = image.data();
    let mut out = vec![0u8; src.len()];
    let count = ((2 * radius + 1) * (2 * radius + 1)) as f64;

    for y in 0..height {
        for x in 0..width {
            let mut sums = [0.0f64; 3];
            for dy in -radius..=radius {
                let ny = (y + dy).clamp(0, height - 1);
                for dx in -radius..=radius {
                    let nx = (x + dx).clamp(0, width - 1);
                    let i = ((ny * width + nx) * 4) as usize;
                    sums[0] += src[i] as f64;
                    sums[1] += src[i + 1] as f64;
                    sums[2] += src[i + 2] as f64;
                }
            }
            let o = ((y * width + x) * 4) as usize;
            out[o] = clamp_u8(sums[0] / count);
            out[o + 1] = clamp_u8(sums[1] / count);
            out[o + 2] = clamp_u8(sums[2] / count);
            out[o + 3] = 255;
        }
    }

    image.with_data(out)
}

/// Apply every non-neutral parameter: brightness, contrast, sharpen, then
/// denoise.
pub fn apply_enhancements(image: &RgbaImage, params: &EnhancementParameters) -> RgbaImage {
    let mut result = image.clone();

    if params.brightness_adj != 0.0 {
        result = adjust_brightness(&result, params.brightness_adj);
    }
    if params.contrast_adj != 1.0 {
        result = adjust_contrast(&result, params.contrast_adj);
    }
    if params.sharpen > 0.0 {
        result = sharpen(&result, params.sharpen);
    }
    if params.denoise > 0.0 {
        result = denoise(&result, params.denoise);
    }

    result
}

fn map_rgb(image: &RgbaImage, f: impl Fn(f64) -> f64) -> RgbaImage {
    let mut out = image.data().to_vec();
    for p in out.chunks_exact_mut(4) {
        for v in &mut p[..3] {
            *v = clamp_u8(f(*v as f64));
        }
    }
    image.with_data(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let v = f(x, y);
            [v, v, v, 128]
        })
        .unwrap()
    }

    #[test]
    fn test_brightness_clamps_and_keeps_alpha() {
        let img = RgbaImage::from_fn(2, 1, |x, _| if x == 0 { [10, 250, 100, 7] } else { [0, 0, 0, 0] })
            .unwrap();
        let out = adjust_brightness(&img, 20.0);
        assert_eq!(out.pixel(0, 0), [30, 255, 120, 7]);

        let out = adjust_brightness(&img, -50.0);
        assert_eq!(out.pixel(0, 0), [0, 200, 50, 7]);
    }

    #[test]
    fn test_contrast_pivots_on_mid_grey() {
        let img = RgbaImage::from_fn(3, 1, |x, _| match x {
            0 => [128, 128, 128, 255],
            1 => [138, 118, 0, 255],
            _ => [255, 255, 255, 9],
        })
        .unwrap();
        let out = adjust_contrast(&img, 2.0);
        assert_eq!(out.pixel(0, 0), [128, 128, 128, 255]);
        assert_eq!(out.pixel(1, 0), [148, 108, 0, 255]);
        assert_eq!(out.pixel(2, 0), [255, 255, 255, 9]);

        let out = adjust_contrast(&img, 0.5);
        assert_eq!(out.pixel(1, 0), [133, 123, 64, 255]);
    }

    #[test]
    fn test_sharpen_zero_is_identity() {
        let img = gray(4, 4, |x, y| (x * 30 + y * 10) as u8);
        assert_eq!(sharpen(&img, 0.0), img);
    }

    #[test]
    fn test_sharpen_interior_and_border() {
        // Centre 100 surrounded by 50, amount 50%: 100 * 3 - 0.5 * 200 = 200.
        let img = gray(3, 3, |x, y| if x == 1 && y == 1 { 100 } else { 50 });
        let out = sharpen(&img, 50.0);
        assert_eq!(out.pixel(1, 1), [200, 200, 200, 255]);
        assert_eq!(out.pixel(0, 0), [50, 50, 50, 255]);
        assert_eq!(out.pixel(2, 1), [50, 50, 50, 255]);
    }

    #[test]
    fn test_sharpen_flat_region_unchanged() {
        let img = gray(5, 5, |_, _| 90);
        let out = sharpen(&img, 80.0);
        assert_eq!(out.pixel(2, 2), [90, 90, 90, 255]);
    }

    #[test]
    fn test_denoise_zero_is_identity() {
        let img = gray(3, 3, |x, _| (x * 40) as u8);
        assert_eq!(denoise(&img, 0.0), img);
    }

    #[test]
    fn test_denoise_box_mean_with_edge_clamp() {
        // strength 30 -> radius ceil(0.9) = 1.
        let img = gray(3, 1, |x, _| [0, 90, 180][x as usize]);
        let out = denoise(&img, 30.0);
        // Left pixel samples x = 0, 0, 1 in each of three (clamped) rows.
        assert_eq!(out.pixel(0, 0), [30, 30, 30, 255]);
        assert_eq!(out.pixel(1, 0), [90, 90, 90, 255]);
        assert_eq!(out.pixel(2, 0), [150, 150, 150, 255]);
    }

    #[test]
    fn test_denoise_radius_grows_with_strength() {
        let img = gray(7, 1, |x, _| if x == 3 { 210 } else { 0 });
        // radius 1: 3 of 9 samples hit the spike
        assert_eq!(denoise(&img, 20.0).pixel(3, 0)[0], 70);
        // radius 3: 7 of 49 samples
        assert_eq!(denoise(&img, 100.0).pixel(3, 0)[0], 30);
    }

    #[test]
    fn test_apply_neutral_parameters_is_identity() {
        let img = gray(4, 4, |x, y| (x * 20 + y * 5) as u8);
        assert_eq!(apply_enhancements(&img, &EnhancementParameters::default()), img);
    }

    #[test]
    fn test_apply_runs_in_order() {
        let img = gray(3, 3, |_, _| 100);
        let params = EnhancementParameters {
            brightness_adj: 28.0,
            contrast_adj: 2.0,
            sharpen: 0.0,
            denoise: 0.0,
        };
        // (100 + 28 - 128) * 2 + 128 = 128; the other order would give 100.
        assert_eq!(apply_enhancements(&img, &params).pixel(1, 1), [128, 128, 128, 128]);
    }
}
