//! Image normalization for the analysis pipeline.
//!
//! Decodes an uploaded image, coerces it to three-channel RGB, and
//! re-encodes it as JPEG at one fixed quality. Every upload goes through
//! the same lossy re-encode regardless of its source container; the
//! outbound payload is always `image/jpeg`.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::codecs::jpeg::JpegEncoder;
use tracing::debug;

use lumen_core::{LumenError, NormalizedImage};

use crate::mime_detect::sniff_format;

/// Fixed re-encode quality. Changing this changes the bytes every
/// normalized image produces, so it is a converter-version constant, not
/// a per-request knob.
pub const JPEG_QUALITY: u8 = 85;

/// Decode `raw`, coerce to RGB8, and re-encode as JPEG + base64.
///
/// Deterministic: identical input bytes produce identical output bytes.
/// Fails with [`LumenError::Decode`] on corrupt or unsupported input;
/// never returns a partial image and has no side effects.
pub fn normalize(raw: &[u8], declared_filename: &str) -> Result<NormalizedImage, LumenError> {
    let source_mime = sniff_format(raw);

    let decoded = image::load_from_memory(raw)
        .map_err(|e| LumenError::Decode(format!("{declared_filename}: {e}")))?;

    // Whatever mode the container held (RGBA, grayscale, palette), the
    // model gets three-channel color.
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| LumenError::Decode(format!("{declared_filename}: re-encode failed: {e}")))?;

    let base64 = STANDARD.encode(&jpeg);
    debug!(
        filename = %declared_filename,
        width,
        height,
        jpeg_bytes = jpeg.len(),
        "normalized upload"
    );

    Ok(NormalizedImage {
        jpeg: jpeg.into(),
        base64,
        width,
        height,
        source_mime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};

    fn png_bytes_rgb(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgb::<u8>([200, 30, 30]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn png_bytes_rgba(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgba::<u8>([10, 200, 10, 128]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn normalize_is_deterministic() {
        let raw = png_bytes_rgb(10, 10);
        let a = normalize(&raw, "test.png").unwrap();
        let b = normalize(&raw, "test.png").unwrap();
        assert_eq!(a.jpeg, b.jpeg);
        assert_eq!(a.base64, b.base64);
    }

    #[test]
    fn normalize_preserves_dimensions() {
        let raw = png_bytes_rgb(17, 9);
        let normalized = normalize(&raw, "odd.png").unwrap();
        assert_eq!((normalized.width, normalized.height), (17, 9));
        assert_eq!(normalized.source_mime, Some("image/png"));
    }

    #[test]
    fn normalize_coerces_alpha_to_rgb() {
        let raw = png_bytes_rgba(4, 4);
        let normalized = normalize(&raw, "alpha.png").unwrap();
        // Output is a decodable three-channel JPEG.
        let reloaded = image::load_from_memory(&normalized.jpeg).unwrap();
        assert_eq!(reloaded.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn corrupt_bytes_fail_with_decode() {
        let err = normalize(&[0x00, 0x01, 0x02, 0x03], "broken.jpg").unwrap_err();
        assert!(matches!(err, LumenError::Decode(_)));
        assert!(err.to_string().contains("broken.jpg"));
    }

    #[test]
    fn truncated_png_fails_with_decode() {
        let mut raw = png_bytes_rgb(10, 10);
        raw.truncate(raw.len() / 2);
        let err = normalize(&raw, "half.png").unwrap_err();
        assert!(matches!(err, LumenError::Decode(_)));
    }
}
