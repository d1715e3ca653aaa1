//! Typed configuration schema for the Lumen service.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LumenConfig {
    pub vision: VisionConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Vision provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisionConfig {
    /// Provider name resolved through the registry ("openai" or "mock").
    pub provider: String,
    /// API credential. Usually written as `${OPENAI_API_KEY}` in the
    /// file and substituted at load time; never logged.
    pub api_key: String,
    pub model: String,
    /// Override for OpenAI-compatible endpoints.
    pub base_url: Option<String>,
    /// Response-length ceiling passed to the remote model.
    pub max_tokens: u32,
    /// Network-level timeout for the single round trip.
    pub timeout_secs: u64,
    /// Optional override of the default five-facet instruction.
    pub prompt: Option<String>,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            base_url: None,
            max_tokens: 800,
            timeout_secs: 60,
            prompt: None,
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    pub level: String,
    /// When set, NDJSON logs are also written to daily-rolling files in
    /// this directory.
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

impl LumenConfig {
    /// Build a config purely from environment variables, for deployments
    /// without a config file.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            vision: VisionConfig {
                provider: std::env::var("LUMEN_PROVIDER")
                    .unwrap_or(defaults.vision.provider),
                api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
                model: std::env::var("LUMEN_MODEL").unwrap_or(defaults.vision.model),
                base_url: std::env::var("LUMEN_BASE_URL").ok(),
                max_tokens: std::env::var("LUMEN_MAX_TOKENS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.vision.max_tokens),
                timeout_secs: std::env::var("LUMEN_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.vision.timeout_secs),
                prompt: std::env::var("LUMEN_PROMPT").ok(),
            },
            server: ServerConfig {
                bind_address: std::env::var("LUMEN_BIND")
                    .unwrap_or(defaults.server.bind_address),
                port: std::env::var("LUMEN_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            logging: LoggingConfig {
                level: std::env::var("RUST_LOG").unwrap_or(defaults.logging.level),
                dir: std::env::var("LUMEN_LOG_DIR").ok(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_hosted_model_settings() {
        let config = LumenConfig::default();
        assert_eq!(config.vision.model, "gpt-4o-mini");
        assert_eq!(config.vision.max_tokens, 800);
        assert!(config.vision.base_url.is_none());
    }

    #[test]
    fn yaml_fields_are_camel_case() {
        let yaml = "vision:\n  apiKey: test-key\n  maxTokens: 128\n";
        let parsed: LumenConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.vision.api_key, "test-key");
        assert_eq!(parsed.vision.max_tokens, 128);
        // Untouched sections keep their defaults.
        assert_eq!(parsed.server.port, 8080);
    }
}
