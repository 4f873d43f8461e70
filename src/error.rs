//! Error types for octoai-llm

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`OctoAiError`]
pub type Result<T> = std::result::Result<T, OctoAiError>;

/// Main error type for octoai-llm
#[derive(Debug, Error)]
pub enum OctoAiError {
    /// A required configuration value was neither given explicitly nor set in the environment
    #[error("Did not find {field}, please add an environment variable `{env_var}` which contains it, or pass `{field}` as a named parameter")]
    Configuration {
        field: &'static str,
        env_var: &'static str,
    },

    /// Configuration value present but unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Settings file parse error
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// The request could not be sent or the connection failed
    #[error("Error raised by inference endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with an `error` payload
    #[error("Error raised by inference API: {0}")]
    Inference(String),

    /// The endpoint answered with something other than the expected payload
    #[error("Malformed response from inference endpoint: {0}")]
    MalformedResponse(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
