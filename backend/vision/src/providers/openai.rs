use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use lumen_core::{AnalysisRequest, LumenError, VisionProvider, VisionResponse};

/// OpenAI-compatible chat-completions vision provider.
///
/// Sends exactly one request per call: one user message holding the
/// instruction text and the image as a JPEG data URI. The response-length
/// ceiling comes from the request; truncation is the remote side's job.
pub struct OpenAiVision {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAiVision {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: model.into(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Point at a compatible endpoint (self-hosted gateway, test server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Network-level timeout; expiry surfaces as [`LumenError::Network`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<RequestMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct RequestMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn build_body(model: &str, request: &AnalysisRequest) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![RequestMessage {
            role: "user".to_string(),
            content: vec![
                ContentPart::Text {
                    text: request.prompt.clone(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: request.image.data_uri(),
                    },
                },
            ],
        }],
        max_tokens: request.max_tokens,
    }
}

#[async_trait]
impl VisionProvider for OpenAiVision {
    fn name(&self) -> &str {
        "openai"
    }

    async fn describe(&self, request: &AnalysisRequest) -> Result<VisionResponse, LumenError> {
        let start = Instant::now();
        let body = build_body(&self.model, request);

        debug!(
            model = %self.model,
            image_bytes = request.image.jpeg.len(),
            max_tokens = request.max_tokens,
            "sending vision request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .timeout(self.timeout)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LumenError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LumenError::Auth(error_body(response).await));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LumenError::Quota(error_body(response).await));
        }
        if !status.is_success() {
            return Err(LumenError::Model(format!(
                "{status}: {}",
                error_body(response).await
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LumenError::Model(format!("malformed completion: {e}")))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(LumenError::Model("empty completion".to_string()));
        }

        Ok(VisionResponse {
            text,
            provider: "openai".to_string(),
            model: self.model.clone(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

async fn error_body(response: reqwest::Response) -> String {
    response.text().await.unwrap_or_default()
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
            source_mime: Some("image/jpeg"),
        };
        AnalysisRequest::new("describe this", image)
    }

    #[test]
    fn body_carries_text_and_data_uri_parts() {
        let body = serde_json::to_value(build_body("gpt-4o-mini", &request())).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 800);
        assert_eq!(body["messages"][0]["role"], "user");

        let parts = body["messages"][0]["content"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[0]["text"], "describe this");
        assert_eq!(parts[1]["type"], "image_url");
        let url = parts[1]["image_url"]["url"].as_str().unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn empty_choices_parse_but_yield_no_text() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
