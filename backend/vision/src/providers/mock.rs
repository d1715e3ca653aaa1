use async_trait::async_trait;

use lumen_core::{AnalysisRequest, LumenError, VisionProvider, VisionResponse};

/// Failure a [`MockVision`] can be scripted to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Auth,
    Network,
    Quota,
    Model,
}

/// A mock vision provider returning a canned reply or a scripted failure.
pub struct MockVision {
    reply: String,
    failure: Option<MockFailure>,
}

impl MockVision {
    /// Always succeed with the given analysis text.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: text.into(),
            failure: None,
        }
    }

    /// Always fail with the given error kind.
    pub fn failing(failure: MockFailure) -> Self {
        Self {
            reply: String::new(),
            failure: Some(failure),
        }
    }
}

#[async_trait]
impl VisionProvider for MockVision {
    fn name(&self) -> &str {
        "mock"
    }

    async fn describe(&self, _request: &AnalysisRequest) -> Result<VisionResponse, LumenError> {
        match self.failure {
            Some(MockFailure::Auth) => Err(LumenError::Auth("mock credential rejected".into())),
            Some(MockFailure::Network) => Err(LumenError::Network("mock endpoint unreachable".into())),
            Some(MockFailure::Quota) => Err(LumenError::Quota("mock quota exhausted".into())),
            Some(MockFailure::Model) => Err(LumenError::Model("mock model failure".into())),
            None => Ok(VisionResponse {
                text: self.reply.clone(),
                provider: "mock".to_string(),
                model: "mock".to_string(),
                latency_ms: 0,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use lumen_core::NormalizedImage;

    fn request() -> AnalysisRequest {
        let image = NormalizedImage {
            jpeg: Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xD9]),
            base64: "/9j/2Q==".to_string(),
            width: 1,
            height: 1,
            source_mime: None,
        };
        AnalysisRequest::new("describe", image)
    }

    #[tokio::test]
    async fn replies_with_fixed_text() {
        let provider = MockVision::replying("A red square.");
        let response = provider.describe(&request()).await.unwrap();
        assert_eq!(response.text, "A red square.");
    }

    #[tokio::test]
    async fn scripted_failures_map_to_error_kinds() {
        for (failure, kind) in [
            (MockFailure::Auth, "auth_error"),
            (MockFailure::Network, "network_error"),
            (MockFailure::Quota, "quota_error"),
            (MockFailure::Model, "model_error"),
        ] {
            let err = MockVision::failing(failure)
                .describe(&request())
                .await
                .unwrap_err();
            assert_eq!(err.kind(), kind);
        }
    }
}
