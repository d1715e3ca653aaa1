//! `${ENV_VAR}` substitution for config values.
//!
//! Only uppercase `[A-Z_][A-Z0-9_]*` names inside `${}` are matched, and
//! only string leaves are processed. A referenced variable that is unset
//! or empty is an error, not a silent blank credential.

use std::collections::HashMap;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references throughout a config value tree using
/// the process environment.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

/// Substitute using a provided map (useful for testing).
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute(value, env, "")
}

fn substitute(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => {
            let mut missing: Option<MissingEnvVarError> = None;
            let replaced = ENV_VAR_PATTERN.replace_all(s, |caps: &regex::Captures<'_>| {
                let name = &caps[1];
                match env.get(name).filter(|v| !v.is_empty()) {
                    Some(v) => v.clone(),
                    None => {
                        missing.get_or_insert(MissingEnvVarError {
                            var_name: name.to_string(),
                            config_path: path.to_string(),
                        });
                        String::new()
                    }
                }
            });
            if let Some(err) = missing {
                return Err(err.into());
            }
            Ok(Value::String(replaced.into_owned()))
        }
        Value::Array(items) => {
            let resolved: Result<Vec<_>> = items
                .iter()
                .enumerate()
                .map(|(i, v)| substitute(v, env, &format!("{path}[{i}]")))
                .collect();
            Ok(Value::Array(resolved?))
        }
        Value::Object(map) => {
            let mut resolved = serde_json::Map::new();
            for (key, v) in map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                resolved.insert(key.clone(), substitute(v, env, &child)?);
            }
            Ok(Value::Object(resolved))
        }
        other => Ok(other.clone()),
    }
}
