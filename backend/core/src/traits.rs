use async_trait::async_trait;

use crate::error::LumenError;
use crate::types::{AnalysisRequest, VisionResponse};

/// Trait for multimodal vision providers.
///
/// Implementations send exactly one request per call: no retries, no
/// backoff, no streaming. Callers that need resilience must wrap this
/// contract themselves.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Provider name (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// One synchronous round trip: prompt + encoded image in, analysis
    /// text out, or one of the closed error kinds.
    async fn describe(&self, request: &AnalysisRequest) -> Result<VisionResponse, LumenError>;
}
