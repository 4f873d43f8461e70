//! File-backed adapter settings
//!
//! Settings are the unresolved input to [`AdapterConfig`](super::AdapterConfig):
//! every field is optional and the schema is strict, so a misspelled key is an
//! error rather than a silently ignored value.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{OctoAiError, Result};

/// Adapter settings as written in `config.json` or collected from the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterSettings {
    /// Endpoint URL to use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Bearer token for the endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Task to call the model with; should be one that returns `generated_text`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,

    /// Keyword arguments forwarded to the model as `parameters`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_kwargs: Option<Map<String, Value>>,

    /// Request timeout in seconds; unset means no timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl AdapterSettings {
    /// Default settings file location (`<config dir>/octoai/config.json`)
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("octoai")
            .join("config.json")
    }

    /// Load settings from a specific path
    ///
    /// A missing file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// contains a key outside the schema
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| OctoAiError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| OctoAiError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Overlay `other` on top of `self`; fields set in `other` win
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            endpoint_url: other.endpoint_url.or(self.endpoint_url),
            api_token: other.api_token.or(self.api_token),
            task: other.task.or(self.task),
            model_kwargs: other.model_kwargs.or(self.model_kwargs),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
        }
    }
}
