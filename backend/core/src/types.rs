use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An image exactly as received from the upload boundary.
///
/// Read-only; discarded once normalization has produced a
/// [`NormalizedImage`].
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub bytes: Bytes,
}

impl UploadedImage {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Pixel data coerced to three-channel RGB and re-encoded as JPEG,
/// carried both as raw bytes and as a base64 string ready for a data URI.
#[derive(Clone)]
pub struct NormalizedImage {
    pub jpeg: Bytes,
    pub base64: String,
    pub width: u32,
    pub height: u32,
    /// Container the upload was sniffed as (e.g. "image/png"), kept for
    /// metadata display only. The normalized payload is always JPEG.
    pub source_mime: Option<&'static str>,
}

impl NormalizedImage {
    /// Render the payload as a `data:image/jpeg;base64,...` URI.
    pub fn data_uri(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.base64)
    }
}

// Keep multi-megabyte payloads out of debug logs.
impl fmt::Debug for NormalizedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedImage")
            .field("jpeg_bytes", &self.jpeg.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("source_mime", &self.source_mime)
            .finish()
    }
}

/// One analysis round trip: the fixed instruction plus the encoded image.
/// Immutable once constructed.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub prompt: String,
    pub image: NormalizedImage,
    /// Response-length ceiling passed to the remote model. Truncation
    /// beyond this budget is the remote service's responsibility.
    pub max_tokens: u32,
}

impl AnalysisRequest {
    pub const DEFAULT_MAX_TOKENS: u32 = 800;

    pub fn new(prompt: impl Into<String>, image: NormalizedImage) -> Self {
        Self {
            prompt: prompt.into(),
            image,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Successful response from a vision provider.
#[derive(Debug, Clone)]
pub struct VisionResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    pub latency_ms: u64,
}

/// One recorded analysis, owned by the session history until an explicit
/// clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub filename: String,
    pub analysis: String,
    /// Wall-clock time of the successful analysis, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Renderable copy of the normalized image, for re-display.
    pub image_base64: String,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_normalized() -> NormalizedImage {
        NormalizedImage {
            jpeg: Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xD9]),
            base64: "/9j/2Q==".to_string(),
            width: 1,
            height: 1,
            source_mime: Some("image/png"),
        }
    }

    #[test]
    fn data_uri_has_jpeg_mime_prefix() {
        let uri = tiny_normalized().data_uri();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        assert!(uri.ends_with("/9j/2Q=="));
    }

    #[test]
    fn debug_omits_payload() {
        let rendered = format!("{:?}", tiny_normalized());
        assert!(!rendered.contains("/9j/2Q=="));
    }

    #[test]
    fn request_defaults_to_response_budget() {
        let req = AnalysisRequest::new("describe", tiny_normalized());
        assert_eq!(req.max_tokens, AnalysisRequest::DEFAULT_MAX_TOKENS);
        assert_eq!(req.with_max_tokens(128).max_tokens, 128);
    }
}
