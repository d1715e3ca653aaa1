//! `lumen-config` — runtime configuration for the Lumen service.
//!
//! Provides:
//! - Typed YAML config schema (vision provider, server, logging)
//! - `${ENV_VAR}` substitution at load time
//! - Env-only fallback for configless deployments
//! - Redaction of secret fields for safe logging/display

pub mod env;
pub mod redact;
pub mod schema;

pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use redact::redact;
pub use schema::{LoggingConfig, LumenConfig, ServerConfig, VisionConfig};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Default config file location (`<config_dir>/lumen/lumen.yaml`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lumen").join("lumen.yaml"))
}

/// Load a config file, substituting `${VAR}` references from the
/// process environment.
pub fn load_config(path: &Path) -> Result<LumenConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(&raw).context("Failed to parse config YAML")?;
    let value =
        serde_json::to_value(&yaml).context("Failed to convert config for processing")?;

    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;

    let config: LumenConfig =
        serde_json::from_value(value).context("Failed to deserialize config")?;
    Ok(config)
}

/// Snapshot of a config with secret fields masked, safe to log or print.
pub fn redacted(config: &LumenConfig) -> serde_json::Value {
    let value = serde_json::to_value(config).unwrap_or_default();
    redact(&value)
}
