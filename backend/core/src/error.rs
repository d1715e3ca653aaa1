use thiserror::Error;

/// Top-level error type for the Lumen pipeline.
///
/// The first five variants are the closed set a `process` call can fail
/// with; `Config` only occurs at startup. The presentation layer relies
/// on the variants staying distinct, so nothing here collapses into a
/// generic catch-all.
#[derive(Debug, Error)]
pub enum LumenError {
    #[error("image decode failed: {0}")]
    Decode(String),

    #[error("vision provider rejected credentials: {0}")]
    Auth(String),

    #[error("vision provider unreachable: {0}")]
    Network(String),

    #[error("vision provider quota exhausted: {0}")]
    Quota(String),

    #[error("vision model failed: {0}")]
    Model(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl LumenError {
    /// Stable machine-readable tag for each variant, used in API error
    /// bodies and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            LumenError::Decode(_) => "decode_error",
            LumenError::Auth(_) => "auth_error",
            LumenError::Network(_) => "network_error",
            LumenError::Quota(_) => "quota_error",
            LumenError::Model(_) => "model_error",
            LumenError::Config(_) => "config_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinct() {
        let errors = [
            LumenError::Decode("x".into()),
            LumenError::Auth("x".into()),
            LumenError::Network("x".into()),
            LumenError::Quota("x".into()),
            LumenError::Model("x".into()),
            LumenError::Config("x".into()),
        ];
        let kinds: std::collections::HashSet<_> = errors.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds.len(), errors.len());
    }
}
