//! Config redaction: mask secret fields before a config is logged or
//! displayed.

use serde_json::Value;

/// Field names whose string values are secrets.
static SENSITIVE_KEYS: &[&str] = &[
    "apiKey",
    "api_key",
    "apikey",
    "token",
    "secret",
    "password",
    "authorization",
];

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Redact a config value tree, masking every sensitive field.
///
/// The result is safe to log or share for debugging. Masked values keep a
/// four-character hint so distinct credentials stay distinguishable.
pub fn redact(value: &Value) -> Value {
    redact_inner(value, "")
}

fn redact_inner(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_sensitive_key(key) && !s.is_empty() => {
            let hint = if s.len() > 4 {
                format!("{}***", &s[..4])
            } else {
                "***".to_string()
            };
            Value::String(hint)
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| redact_inner(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_inner(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}
