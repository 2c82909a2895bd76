//! PNG decoding and encoding.

use std::io::Cursor;

use super::RgbaImage;
use crate::error::ImagingError;

/// Decode a PNG of any colour type and bit depth into 8-bit RGBA.
///
/// Palette and low-bit images are expanded, 16-bit channels are stripped to
/// 8 bits, and a missing alpha channel becomes fully opaque.
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, ImagingError> {
    decode_png_limited(bytes, usize::MAX)
}

/// [`decode_png`], refusing images larger than `max_pixels` before any pixel
/// data is decoded.
pub fn decode_png_limited(bytes: &[u8], max_pixels: usize) -> Result<RgbaImage, ImagingError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| ImagingError::PngDecode(e.to_string()))?;

    let header = reader.info();
    let pixels = header.width as usize * header.height as usize;
    if pixels > max_pixels {
        return Err(ImagingError::TooManyPixels {
            pixels,
            max: max_pixels,
        });
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ImagingError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let data = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(ImagingError::PngDecode(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    tracing::trace!(
        width = info.width,
        height = info.height,
        color = ?info.color_type,
        "Decoded PNG"
    );

    RgbaImage::new(info.width, info.height, data)
}

/// Encode an image as an 8-bit RGBA PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ImagingError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ImagingError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(image.data())
            .map_err(|e| ImagingError::PngEncode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| ImagingError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_raw(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        buf
    }

    #[test]
    fn test_encode_then_decode_preserves_pixels() {
        let img = RgbaImage::from_fn(4, 3, |x, y| [x as u8 * 60, y as u8 * 80, 7, 200]).unwrap();
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(decode_png(&png).unwrap(), img);
    }

    #[test]
    fn test_decode_rgb_adds_opaque_alpha() {
        let png = encode_raw(2, 1, png::ColorType::Rgb, &[10, 20, 30, 40, 50, 60]);
        let img = decode_png(&png).unwrap();
        assert_eq!(img.pixel(0, 0), [10, 20, 30, 255]);
        assert_eq!(img.pixel(1, 0), [40, 50, 60, 255]);
    }

    #[test]
    fn test_decode_grayscale_replicates_channels() {
        let png = encode_raw(2, 1, png::ColorType::Grayscale, &[0, 128]);
        let img = decode_png(&png).unwrap();
        assert_eq!(img.pixel(1, 0), [128, 128, 128, 255]);

        let png = encode_raw(1, 1, png::ColorType::GrayscaleAlpha, &[77, 9]);
        assert_eq!(decode_png(&png).unwrap().pixel(0, 0), [77, 77, 77, 9]);
    }

    #[test]
    fn test_decode_limited_checks_header() {
        let img = RgbaImage::filled(10, 10, [1, 2, 3, 4]).unwrap();
        let png = encode_png(&img).unwrap();
        assert!(decode_png_limited(&png, 100).is_ok());
        assert!(matches!(
            decode_png_limited(&png, 99),
            Err(ImagingError::TooManyPixels {
                pixels: 100,
                max: 99
            })
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_png(b"definitely not a png").unwrap_err();
        assert!(matches!(err, ImagingError::PngDecode(_)));
    }
}
