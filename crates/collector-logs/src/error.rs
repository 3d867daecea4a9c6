//! Error types for collector-logs.

use collector_config::ConfigError;
use thiserror::Error;

/// Result type alias for collector-logs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Unknown feature gate `{0}`")]
    UnknownFeature(String),

    #[error("Feature gate `{feature}` must be true or false, found `{value}`")]
    InvalidFeatureValue { feature: String, value: String },

    #[error("Expected `Name=true|false` in feature gates, found `{0}`")]
    MalformedFeatureGate(String),
}
