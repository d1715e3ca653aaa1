//! The analysis pipeline: normalize, describe, record.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use lumen_core::{AnalysisPrompt, AnalysisRequest, HistoryEntry, LumenError, VisionProvider};
use lumen_session::HistoryStore;

/// Orchestrates one upload end to end.
///
/// A `process` call moves Received → Normalizing → Analyzing → Recorded.
/// The first failure aborts the run and leaves the history untouched; on
/// success exactly one entry is appended, stamped with a wall-clock time
/// captured once.
pub struct AnalysisPipeline {
    provider: Arc<dyn VisionProvider>,
    store: HistoryStore,
    prompt: AnalysisPrompt,
    max_tokens: u32,
}

impl AnalysisPipeline {
    pub fn new(provider: Arc<dyn VisionProvider>, store: HistoryStore) -> Self {
        Self {
            provider,
            store,
            prompt: AnalysisPrompt::default(),
            max_tokens: AnalysisRequest::DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_prompt(mut self, prompt: AnalysisPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// The session history this pipeline records into.
    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Run one upload through the pipeline.
    ///
    /// No retries between stages; nothing is appended unless the whole
    /// run succeeds.
    pub async fn process(
        &self,
        raw: &[u8],
        declared_filename: &str,
    ) -> Result<HistoryEntry, LumenError> {
        let normalized = media::normalize(raw, declared_filename)?;
        info!(
            filename = %declared_filename,
            width = normalized.width,
            height = normalized.height,
            "upload normalized"
        );

        let request = AnalysisRequest::new(self.prompt.text.clone(), normalized.clone())
            .with_max_tokens(self.max_tokens);
        let response = self.provider.describe(&request).await?;
        info!(
            provider = %self.provider.name(),
            model = %response.model,
            latency_ms = response.latency_ms,
            "analysis complete"
        );

        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            filename: declared_filename.to_string(),
            analysis: response.text,
            timestamp: current_timestamp(),
            image_base64: normalized.base64,
            width: normalized.width,
            height: normalized.height,
        };
        self.store.append(entry.clone()).await;

        Ok(entry)
    }
}

/// Wall-clock capture, formatted the way history entries display it.
fn current_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
