//! Test fixtures: synthetic images and metric sets.

use fuzzy_enhance::imaging::{encode_png, RgbaImage};

/// Metrics with a known inference trace
pub mod metrics {
    /// Fires rules 5, 13, 27, 30 and 39
    pub const REFERENCE: &str =
        r#"{"brightness": 127, "contrast": 50, "sharpness": 70, "noise": 10}"#;

    /// Black, flat and noisy: brightness and denoise at their maximum
    pub const EXTREME_DARK: &str =
        r#"{"brightness": 0, "contrast": 0, "sharpness": 0, "noise": 100}"#;

    /// Outside every term: nothing fires
    pub const OUT_OF_RANGE: &str =
        r#"{"brightness": -50, "contrast": -50, "sharpness": -50, "noise": -50}"#;
}

/// Uniform grey image
pub fn flat_image(width: u32, height: u32, value: u8) -> RgbaImage {
    RgbaImage::filled(width, height, [value, value, value, 255]).unwrap()
}

/// Dark image with a faint diagonal texture
pub fn dark_image() -> RgbaImage {
    RgbaImage::from_fn(16, 16, |x, y| {
        let v = 10 + ((x + y) % 3) as u8 * 5;
        [v, v, v, 255]
    })
    .unwrap()
}

/// Encode an image for upload
pub fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    encode_png(image).unwrap()
}
