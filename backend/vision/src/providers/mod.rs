pub mod mock;
pub mod openai;

pub use mock::{MockFailure, MockVision};
pub use openai::OpenAiVision;

use std::collections::HashMap;
use std::sync::Arc;

use lumen_core::VisionProvider;

/// Registry of vision providers, looked up by the name configured under
/// `vision.provider`.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn VisionProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider by name.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn VisionProvider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Look up a provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn VisionProvider>> {
        self.providers.get(name).cloned()
    }

    /// Names of all registered providers.
    pub fn list(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
