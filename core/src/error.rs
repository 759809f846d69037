use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        source: serde_json::Error,
    },

    /// The authored value does not fit any [`TokenValue`](crate::TokenValue) variant.
    #[error("token '{token}' has an unsupported value: {message}")]
    UnsupportedValue { token: String, message: String },

    #[error("token '{token}' has malformed shadow color '{color}', expected #RRGGBBAA")]
    MalformedShadowColor { token: String, color: String },

    #[error("token '{token}' has invalid color '{color}'")]
    InvalidColor { token: String, color: String },

    #[error("token '{token}' references undefined token '{reference}'")]
    UndefinedReference { token: String, reference: String },

    #[error("circular reference: {}", chain.join(" -> "))]
    CircularReference { chain: Vec<String> },

    /// A composite value was referenced from inside a larger string.
    #[error("token '{token}' cannot interpolate composite token '{reference}'")]
    CompositeInterpolation { token: String, reference: String },

    #[error("unknown transform '{0}'")]
    UnknownTransform(String),

    #[error("unknown transform group '{0}'")]
    UnknownTransformGroup(String),

    #[error("unknown format '{0}'")]
    UnknownFormat(String),

    #[error("unknown platform '{0}'")]
    UnknownPlatform(String),
}

pub type Result<T> = std::result::Result<T, TokenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_error_names_the_token() {
        let err = TokenError::MalformedShadowColor {
            token: "shadow-base-all-card".to_string(),
            color: "#FFF".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("shadow-base-all-card"));
        assert!(msg.contains("#FFF"));
    }

    #[test]
    fn circular_reference_lists_chain() {
        let err = TokenError::CircularReference {
            chain: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert_eq!(err.to_string(), "circular reference: a -> b -> a");
    }
}
