/// The default instruction sent with every image, enumerating the five
/// requested analysis facets.
pub const DEFAULT_ANALYSIS_PROMPT: &str = "Analyze this image in detail:\n\
1. Full description\n\
2. Objects detected\n\
3. Text visible\n\
4. Scene explanation\n\
5. Insights";

/// The instruction template handed to a vision provider.
///
/// Carried as a value (not a literal inside the client) so deployments
/// and tests can vary it without touching the provider.
#[derive(Debug, Clone)]
pub struct AnalysisPrompt {
    pub text: String,
}

impl Default for AnalysisPrompt {
    fn default() -> Self {
        Self {
            text: DEFAULT_ANALYSIS_PROMPT.to_string(),
        }
    }
}

impl AnalysisPrompt {
    pub fn custom(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prompt_lists_five_facets() {
        let prompt = AnalysisPrompt::default();
        for line in ["1.", "2.", "3.", "4.", "5."] {
            assert!(prompt.text.contains(line));
        }
        assert!(prompt.text.contains("Objects detected"));
        assert!(prompt.text.contains("Insights"));
    }
}
