//! Image container detection for the upload boundary.
//!
//! Uploads arrive as raw bytes, so the authoritative check sniffs magic
//! numbers; extension-based lookup exists only for labeling metadata.

/// Sniff an image container from its leading magic bytes.
pub fn sniff_format(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}

/// Whether the bytes look like a container the normalizer can decode.
pub fn is_supported_upload(bytes: &[u8]) -> bool {
    sniff_format(bytes).is_some()
}

/// Detect MIME type by filename extension. Display/labeling only; never
/// trusted over [`sniff_format`].
pub fn detect_mime_type(filename: &str) -> &'static str {
    let ext = filename
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "bmp"          => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        _              => "application/octet-stream",
    }
}

/// Whether a MIME type is for an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_png_and_jpeg() {
        assert_eq!(sniff_format(b"\x89PNG\r\n\x1a\n...."), Some("image/png"));
        assert_eq!(sniff_format(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
    }

    #[test]
    fn sniffs_webp_riff_header() {
        assert_eq!(sniff_format(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("image/webp"));
    }

    #[test]
    fn rejects_text_payload() {
        assert_eq!(sniff_format(b"hello, not an image"), None);
        assert!(!is_supported_upload(b"hello, not an image"));
    }

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(detect_mime_type("PHOTO.JPG"), "image/jpeg");
        assert_eq!(detect_mime_type("scan.tiff"), "image/tiff");
        assert_eq!(detect_mime_type("file.xyz"), "application/octet-stream");
    }

    #[test]
    fn image_mime_check() {
        assert!(is_image("image/png"));
        assert!(!is_image("text/plain"));
    }
}
